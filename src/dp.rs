use crate::action::Action;
use crate::action_string::ActionString;
use crate::packed::PackedInverse;
use crate::simulator::Simulator;
use crate::state::AdventurerState;
use crate::EPSILON;
use rayon::prelude::*;

/// one streamed improvement in the best-damage-so-far curve.
#[derive(Clone, Debug)]
pub struct BestPoint {
    pub frame: u32,
    pub damage: f32,
    pub sequence: ActionString,
}

/// frame-indexed dynamic program over a minimized partition graph. holds a
/// rolling window of `width` frames rather than the whole horizon, since
/// no edge's frame cost exceeds `width - 1`.
pub struct Dp<'a> {
    sim: &'a Simulator<'a>,
    inverse: &'a PackedInverse,
    representative: &'a [AdventurerState],
    num_partitions: u32,
    width: u32,
    initial_partition: u32,
    best_dps: Vec<f32>,
    best_seq: Vec<ActionString>,
}

impl<'a> Dp<'a> {
    /// `width` must exceed the frame cost of every edge in `inverse`; the
    /// caller computes this once up front by replaying every edge through
    /// the simulator on its representative state.
    pub fn new(
        sim: &'a Simulator<'a>,
        inverse: &'a PackedInverse,
        representative: &'a [AdventurerState],
        num_partitions: u32,
        width: u32,
        initial_partition: u32,
    ) -> Self {
        let size = (width as usize) * (num_partitions as usize);
        let mut best_dps = vec![-1.0f32; size];
        let best_seq = vec![ActionString::empty(); size];
        let dix0 = Self::dix_static(width, num_partitions, 0, initial_partition);
        best_dps[dix0] = 0.0;
        Self { sim, inverse, representative, num_partitions, width, initial_partition, best_dps, best_seq }
    }

    fn dix_static(width: u32, num_partitions: u32, frame: u32, partition: u32) -> usize {
        ((frame % width) * num_partitions + partition) as usize
    }

    fn dix(&self, frame: u32, partition: u32) -> usize {
        Self::dix_static(self.width, self.num_partitions, frame, partition)
    }

    /// compute the edge frame cost and damage for `(predecessor, action) ->
    /// partition`, replaying on the predecessor's representative state. an
    /// illegal replay here is an invariant violation: the edge came from the
    /// inverse relation, so it must have been legal when discovered.
    fn edge(&self, predecessor: u32, action: u8) -> (u32, f64) {
        let state = self.representative[predecessor as usize];
        let a = Action::from_index(action);
        let (_, frames, damage) = self
            .sim
            .apply_action(state, a)
            .expect("edge from inverse relation must replay legally on its representative");
        (frames, damage)
    }

    /// run the dp forward through `horizon` frames, calling `on_improvement`
    /// every time the best damage across all partitions strictly improves,
    /// and `on_frame` once per frame regardless (for throughput diagnostics).
    pub fn run(&mut self, horizon: u32, mut on_improvement: impl FnMut(BestPoint), mut on_frame: impl FnMut(u32)) {
        let mut last_best = 0.0f32;
        for f in 1..=horizon {
            self.step(f);
            on_frame(f);

            let mut best: Option<(f32, ActionString)> = None;
            for p in 0..self.num_partitions {
                let v = self.best_dps[self.dix(f, p)];
                if v < 0.0 {
                    continue;
                }
                match &best {
                    Some((bv, bs)) if *bv > v || (*bv == v && *bs >= self.best_seq[self.dix(f, p)]) => {}
                    _ => best = Some((v, self.best_seq[self.dix(f, p)])),
                }
            }
            if let Some((value, sequence)) = best {
                if value > last_best + EPSILON {
                    last_best = value;
                    on_improvement(BestPoint { frame: f, damage: value, sequence });
                }
            }
        }
    }

    fn step(&mut self, f: u32) {
        let width = self.width;
        let num_partitions = self.num_partitions;
        let inverse = self.inverse;

        // the row for this frame aliases the row `width` frames ago via the
        // cyclic index, and is deliberately left as-is rather than cleared:
        // whatever it already holds is the best damage reachable at any
        // earlier frame congruent to `f` mod `width`, which remains a valid
        // (if stale) lower bound here — nothing forces an action every
        // frame, so "no new edge beats it" and "still standing there" are
        // the same outcome.
        let row_start = ((f % width) * num_partitions) as usize;

        let edges: Vec<Vec<(u32, u8)>> = (0..num_partitions).map(|p| inverse.predecessors(p as usize).collect()).collect();

        // immutable reborrow: the parallel closures below only read
        // `best_dps`/`best_seq` from frames prior to this step's write-back
        // (including this very row's stale carry-forward value) and call
        // `edge`, which also only reads. writes land afterwards, single-
        // threaded, from `updates`.
        let this: &Dp = self;
        let updates: Vec<(f32, ActionString)> = edges
            .into_par_iter()
            .enumerate()
            .map(|(p, preds)| {
                let mut best_value = this.best_dps[row_start + p];
                let mut best_seq = this.best_seq[row_start + p];
                for (prev_p, action) in preds {
                    let (frames, damage) = this.edge(prev_p, action);
                    if f < frames {
                        continue;
                    }
                    let prev_frame = f - frames;
                    let prev_idx = Self::dix_static(width, num_partitions, prev_frame, prev_p);
                    let prev_value = this.best_dps[prev_idx];
                    if prev_value < 0.0 {
                        continue;
                    }
                    let candidate = prev_value + damage as f32;
                    let candidate_seq = this.best_seq[prev_idx].push(Action::from_index(action));

                    if candidate > best_value + EPSILON {
                        best_value = candidate;
                        best_seq = candidate_seq;
                    } else if candidate > best_value - EPSILON && candidate_seq > best_seq {
                        best_value = candidate;
                        best_seq = candidate_seq;
                    }
                }
                (best_value, best_seq)
            })
            .collect();

        for (p, (value, seq)) in updates.into_iter().enumerate() {
            let idx = row_start + p;
            self.best_dps[idx] = value;
            self.best_seq[idx] = seq;
        }
    }
}

/// compute the minimum rolling window width: one more than the largest
/// frame cost among all partition-graph edges.
pub fn window_width(sim: &Simulator, inverse: &PackedInverse, representative: &[AdventurerState], num_partitions: u32) -> u32 {
    let mut max_frames = 0u32;
    for target in 0..num_partitions as usize {
        for (predecessor, action) in inverse.predecessors(target) {
            let state = representative[predecessor as usize];
            let a = Action::from_index(action);
            if let Some((_, frames, _)) = sim.apply_action(state, a) {
                max_frames = max_frames.max(frames);
            }
        }
    }
    max_frames + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ActionStat, AdventurerName, AdventurerStat, Config, Modifiers, WeaponClassStat, WeaponKind, WeaponName, WeaponStat};
    use crate::explore::{explore, initial_partition};
    use crate::minimize::{minimize, partition_inverse, HopcroftInput};

    fn stat(damage_percent: f64, sp: u16, startup: u16, recovery: u16) -> ActionStat {
        ActionStat { damage_percent, sp, startup, recovery }
    }

    fn tiny_config() -> Config {
        Config {
            weapon_class: WeaponClassStat {
                x_stats: [stat(100.0, 0, 5, 5); 5],
                fs_stat: stat(150.0, 0, 5, 5),
                xfs_startups: None,
            },
            weapon: WeaponStat { name: WeaponName::Named(1), kind: WeaponKind::Sword, s3_stat: None },
            adventurer: AdventurerStat {
                name: AdventurerName::Generic,
                s1_stat: stat(200.0, 20, 10, 10),
                s2_stat: stat(250.0, 30, 10, 10),
                base_strength: 100.0,
            },
            modifiers: Modifiers {
                strength_mod: 0.0,
                coability_strength_mod: 0.0,
                skill_dmg_mod: 0.0,
                coability_skill_dmg_mod: 0.0,
                fs_dmg_mod: 0.0,
                crit_rate: 0.0,
                crit_dmg_base: 0.7,
            },
        }
    }

    #[test]
    fn dp_produces_monotonically_non_decreasing_best() {
        let config = tiny_config();
        let sim = Simulator::new(&config, 2);
        let space = explore(&sim, AdventurerState::zero());
        let coarse = initial_partition(&space.state_decode);
        let hop = minimize(HopcroftInput {
            inverse: space.inverse.clone(),
            num_states: space.state_decode.len() as u32,
            num_actions: Action::ALL.len() as u8,
            initial_partition: coarse,
        });
        let (part_inverse, representative_ids) = partition_inverse(&hop.partition, &space.inverse, hop.num_partitions);
        let representative: Vec<AdventurerState> = representative_ids.iter().map(|&s| space.state_decode[s as usize]).collect();
        let width = window_width(&sim, &part_inverse, &representative, hop.num_partitions);
        let initial_partition_id = hop.partition[space.initial as usize];

        let mut dp = Dp::new(&sim, &part_inverse, &representative, hop.num_partitions, width, initial_partition_id);
        let mut points: Vec<BestPoint> = Vec::new();
        dp.run(200, |p| points.push(p), |_| {});

        let mut last = -1.0f32;
        for p in &points {
            assert!(p.damage > last);
            last = p.damage;
        }
        assert!(!points.is_empty());
    }
}
