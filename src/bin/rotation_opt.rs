//! `rotation-opt`: load a configuration, explore and minimize the reachable
//! state space, then run the frame-indexed dp to find the highest-damage
//! action rotation over a bounded horizon. streams improvements to stdout.

use anyhow::Context;
use clap::Parser;
use rotation_opt::action::Action;
use rotation_opt::config::Config;
use rotation_opt::dp::{window_width, Dp};
use rotation_opt::explore::{explore, initial_partition};
use rotation_opt::minimize::{minimize, partition_inverse, HopcroftInput};
use rotation_opt::report::Reporter;
use rotation_opt::simulator::Simulator;
use rotation_opt::state::AdventurerState;
use std::path::PathBuf;

/// search for the highest-damage action rotation within a frame horizon.
#[derive(Parser, Debug)]
#[command(name = "rotation-opt", version)]
struct Args {
    /// path to a json configuration file; reads stdin when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// skill-point prep percent applied before exploration begins.
    #[arg(long = "skill-prep")]
    skill_prep: Option<u8>,

    /// projectile travel delay, in frames, for projectile-bearing weapons.
    #[arg(long = "projectile-delay", default_value_t = rotation_opt::PROJECTILE_DELAY)]
    projectile_delay: u32,

    /// number of skill slots this adventurer has available (2 or 3).
    #[arg(long = "num-skills", default_value_t = 2)]
    num_skills: u8,

    /// frame horizon to search; defaults to 60 seconds at 60 fps.
    #[arg(default_value_t = rotation_opt::FRAME_HORIZON)]
    frames: u32,
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

    let initial = sim.apply_prep(AdventurerState::zero(), args.skill_prep);

    log::info!("exploring state space from prepped initial state");
    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.enable_steady_tick(std::time::Duration::from_millis(200));
    let space = explore(&sim, initial);
    spinner.finish_and_clear();
    log::info!("explored {} states", space.state_decode.len());

    let coarse = initial_partition(&space.state_decode);
    let hop = minimize(HopcroftInput {
        inverse: space.inverse.clone(),
        num_states: space.state_decode.len() as u32,
        num_actions: Action::ALL.len() as u8,
        initial_partition: coarse,
    });
    log::info!("minimized to {} partitions", hop.num_partitions);

    let (part_inverse, representative_ids) = partition_inverse(&hop.partition, &space.inverse, hop.num_partitions);
    let representative: Vec<AdventurerState> =
        representative_ids.iter().map(|&s| space.state_decode[s as usize]).collect();

    let width = window_width(&sim, &part_inverse, &representative, hop.num_partitions);
    log::info!("rolling window width: {} frames", width);
    let initial_partition_id = hop.partition[space.initial as usize];

    let mut dp = Dp::new(&sim, &part_inverse, &representative, hop.num_partitions, width, initial_partition_id);

    let reporter = Reporter::new();
    let mut fpm_reporter = Reporter::new();
    let bar = rotation_opt::progress(args.frames as usize);
    dp.run(
        args.frames,
        |point| reporter.report(&point),
        |frame| {
            bar.set_position(frame as u64);
            fpm_reporter.maybe_emit_fpm(frame);
        },
    );
    bar.finish_and_clear();

    Ok(())
}
