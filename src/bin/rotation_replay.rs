//! `rotation-replay`: replay a literal action list through the simulator
//! from the zero state, with no exploration, minimization, or dp. useful for
//! sanity-checking frame/damage accounting against a known rotation.

use anyhow::Context;
use clap::Parser;
use rotation_opt::action::Action;
use rotation_opt::config::Config;
use rotation_opt::simulator::Simulator;
use rotation_opt::state::AdventurerState;
use std::path::PathBuf;

/// replay a hand-written action rotation and report its frames/damage.
#[derive(Parser, Debug)]
#[command(name = "rotation-replay", version)]
struct Args {
    /// path to a json configuration file; reads stdin when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// skill-point prep percent applied before replay begins.
    #[arg(long = "skill-prep")]
    skill_prep: Option<u8>,

    /// projectile travel delay, in frames, for projectile-bearing weapons.
    #[arg(long = "projectile-delay", default_value_t = rotation_opt::PROJECTILE_DELAY)]
    projectile_delay: u32,

    /// number of skill slots this adventurer has available (2 or 3).
    #[arg(long = "num-skills", default_value_t = 2)]
    num_skills: u8,

    /// action tokens: `x`, `fs`, `s1`, `s2`, `s3`, or shorthand `cN`/`cNfs`
    /// (`cN` expands to `N` repeated `x` inputs).
    #[arg(required = true)]
    actions: Vec<String>,
}

/// expand one replay token into the sequence of `Action`s it denotes.
fn expand(token: &str) -> anyhow::Result<Vec<Action>> {
    let lower = token.to_ascii_lowercase();
    match lower.as_str() {
        "x" => return Ok(vec![Action::X]),
        "fs" => return Ok(vec![Action::FS]),
        "s1" => return Ok(vec![Action::S1]),
        "s2" => return Ok(vec![Action::S2]),
        "s3" => return Ok(vec![Action::S3]),
        _ => {}
    }
    let body = lower.strip_prefix('c').ok_or_else(|| anyhow::anyhow!("unrecognized action token: {token}"))?;
    let (digits, has_fs) = match body.strip_suffix("fs") {
        Some(rest) => (rest, true),
        None => (body, false),
    };
    let n: u32 = digits.parse().with_context(|| format!("unrecognized action token: {token}"))?;
    anyhow::ensure!(n >= 1, "cN shorthand requires N >= 1, got {token}");
    let mut actions = vec![Action::X; n as usize];
    if has_fs {
        actions.push(Action::FS);
    }
    Ok(actions)
}

fn main() -> anyhow::Result<()> {
    rotation_opt::init();

    if let Err(err) = run(Args::parse()) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run(args: Args) -> anyhow::Result<()> {
    if !(2..=3).contains(&args.num_skills) {
        anyhow::bail!("--num-skills must be 2 or 3, got {}", args.num_skills);
    }
    let num_skills = args.num_skills as usize;

    let config = Config::load(args.config.as_deref()).context("loading configuration")?;
    let sim = Simulator::new(&config, num_skills).with_projectile_delay(args.projectile_delay);

    let mut actions = Vec::new();
    for token in &args.actions {
        actions.extend(expand(token)?);
    }

    let mut state = sim.apply_prep(AdventurerState::zero(), args.skill_prep);
    let mut total_frames: u32 = 0;
    let mut total_damage: f64 = 0.0;

    for (i, action) in actions.iter().enumerate() {
        let (next, frames, damage) = sim
            .apply_action(state, *action)
            .with_context(|| format!("action #{} ({:?}) is illegal from the current state", i + 1, action))?;
        state = next;
        total_frames += frames;
        total_damage += damage;
    }

    println!("{total_damage} dmg in {total_frames} frames ({:.3}s elapsed)", total_frames as f64 / 60.0);
    Ok(())
}
