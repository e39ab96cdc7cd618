pub mod action;
pub mod action_string;
pub mod config;
pub mod dp;
pub mod effects;
pub mod error;
pub mod explore;
pub mod minimize;
pub mod packed;
pub mod report;
pub mod simulator;
pub mod state;

/// damage comparison tolerance used throughout the DP core.
pub const EPSILON: f32 = 0.01;
/// frames of skill-input lockout after casting a skill.
pub const UI_HIDDEN_FRAMES_CAP: u8 = 114;
/// default travel delay, in frames, for projectile-bearing weapons.
pub const PROJECTILE_DELAY: u32 = 50;
/// default search horizon: 60 seconds at 60 fps.
pub const FRAME_HORIZON: u32 = 3600;
/// energy counter value at which the "energized" multiplier applies.
pub const ENERGY_CAP: u8 = 5;

/// buff durations used by the adventurers in `effects`.
pub const STRENGTH_BUFF_FRAMES: u16 = 600;
pub const CRIT_BUFF_FRAMES: u16 = 1200;
pub const ENERGIZED_BUFF_FRAMES: u16 = 900;

/// progress bar matching the crate's other long-running phases.
pub fn progress(n: usize) -> indicatif::ProgressBar {
    let tick = std::time::Duration::from_secs(60);
    let style = "{spinner:.cyan} {elapsed} ~ {percent:>3}% {wide_bar:.cyan}";
    let style = indicatif::ProgressStyle::with_template(style).unwrap();
    let progress = indicatif::ProgressBar::new(n as u64);
    progress.set_style(style);
    progress.enable_steady_tick(tick);
    progress
}

/// initialize combined terminal + file logging.
pub fn init() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
