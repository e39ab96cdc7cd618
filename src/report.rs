//! streams dp improvements to stdout in the spec's wire format and emits a
//! `fpm:` throughput diagnostic to stderr roughly once per wall-clock minute.

use crate::dp::BestPoint;
use std::time::{Duration, Instant};

pub struct Reporter {
    start: Instant,
    last_fpm_at: Instant,
    fpm_interval: Duration,
}

impl Reporter {
    pub fn new() -> Self {
        let now = Instant::now();
        Self { start: now, last_fpm_at: now, fpm_interval: Duration::from_secs(60) }
    }

    /// print one new-best-damage line to stdout, per spec §6.
    pub fn report(&self, point: &BestPoint) {
        println!("{} => {} dmg in {} frames", point.sequence, point.damage, point.frame);
    }

    /// call once per dp frame; emits `fpm: <throughput>` to stderr the first
    /// time a wall-clock minute has elapsed since the last emission.
    pub fn maybe_emit_fpm(&mut self, frame: u32) {
        let now = Instant::now();
        if now.duration_since(self.last_fpm_at) < self.fpm_interval {
            return;
        }
        let elapsed = now.duration_since(self.start).as_secs_f64();
        let fpm = if elapsed > 0.0 { (frame as f64) / elapsed * 60.0 } else { 0.0 };
        eprintln!("fpm: {:.0}", fpm);
        self.last_fpm_at = now;
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}
