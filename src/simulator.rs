use crate::action::{Action, AfterAction};
use crate::config::Config;
use crate::effects::{self, AdventurerEffects, CRIT_BUFF_SLOT, STRENGTH_BUFF_SLOT};
use crate::state::AdventurerState;
use crate::{PROJECTILE_DELAY, UI_HIDDEN_FRAMES_CAP};

const STRENGTH_BUFF_MULT: f64 = 1.15;
const CRIT_BUFF_BONUS: f64 = 0.3;

/// deterministic, pure transition function for one adventurer against a
/// fixed configuration. holds no mutable state of its own.
pub struct Simulator<'a> {
    config: &'a Config,
    effects: AdventurerEffects,
    num_skills: usize,
    projectile_delay: u32,
}

impl<'a> Simulator<'a> {
    pub fn new(config: &'a Config, num_skills: usize) -> Self {
        Self {
            config,
            effects: effects::resolve(config.adventurer.name),
            num_skills,
            projectile_delay: PROJECTILE_DELAY,
        }
    }

    pub fn with_projectile_delay(mut self, frames: u32) -> Self {
        self.projectile_delay = frames;
        self
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    /// apply skill-point prep: set each configured skill's sp to
    /// `percent`% of its cost. a `None` percent is a no-op.
    pub fn apply_prep(&self, prev: AdventurerState, prep_percent: Option<u8>) -> AdventurerState {
        let Some(pct) = prep_percent else { return prev };
        let mut next = prev;
        for slot in 0..self.num_skills {
            let cap = self.config.skill_stat(slot).sp;
            next.sp[slot] = ((cap as f64) * (pct as f64) / 100.0).floor() as u16;
        }
        next
    }

    /// resolve one action against `prev`. returns `None` when the action is
    /// illegal in this state.
    pub fn apply_action(&self, prev: AdventurerState, a: Action) -> Option<(AdventurerState, u32, f64)> {
        if prev.after.is_fs() && (a.skill_index().is_some() || matches!(a, Action::FS)) {
            return None; // no cancel out of FS into another FS or a skill
        }
        if let Some(slot) = a.skill_index() {
            if slot >= self.num_skills || !self.config.has_skill(slot) {
                return None;
            }
        }

        let recovery = self.recovery_frames(prev.after, a);
        let after_recovery = prev.advance_frames(recovery as u16);

        let wait: u16 = if a.skill_index().is_some() {
            after_recovery.ui_hidden_frames_left as u16
        } else {
            0
        };
        let after_wait = after_recovery.advance_frames(wait);

        // late-reject: sp legality is checked only now, after the ui wait
        // has already been absorbed into the frame count.
        if let Some(slot) = a.skill_index() {
            if after_wait.sp[slot] < self.config.skill_stat(slot).sp {
                return None;
            }
        }

        let next_after = self.transition(prev.after, a);
        let startup = self.startup_frames(prev.after, a, next_after);

        let mut pre_hit = after_wait.advance_frames(startup as u16);
        if a.skill_index().is_some() {
            pre_hit.ui_hidden_frames_left = UI_HIDDEN_FRAMES_CAP;
        }

        let hit_state = self.hit_state(prev, after_wait, pre_hit, recovery, a);
        let mut next = pre_hit;
        next.after = next_after;
        if let Some(slot) = a.skill_index() {
            next = next.spend_sp(slot);
        }
        let gained = self.after_action_sp(next_after);
        for slot in 0..self.num_skills {
            next = next.credit_sp(slot, gained, self.config.skill_stat(slot).sp);
        }
        next = (self.effects.on_hit)(next, next_after);

        let damage = self.damage(hit_state, next_after);
        let frames = recovery + wait as u32 + startup;
        Some((next, frames, damage))
    }

    /// which snapshot of state the hit reads buffs from, accounting for
    /// projectile travel delay on combo/fs hits.
    fn hit_state(
        &self,
        prev: AdventurerState,
        after_wait: AdventurerState,
        pre_hit: AdventurerState,
        recovery: u32,
        a: Action,
    ) -> AdventurerState {
        let is_projectile_hit = self.config.weapon.kind.is_projectile() && matches!(a, Action::X | Action::FS);
        if !is_projectile_hit {
            return pre_hit;
        }
        let delay = self.projectile_delay;
        if delay <= recovery {
            prev.advance_frames((recovery - delay) as u16)
        } else {
            after_wait
        }
    }

    /// sp granted to every skill slot by landing a hit with `after`. skills
    /// themselves grant none; they spend sp instead. read from the same
    /// per-action stat the damage/frame accounting uses, not a hardcoded table.
    fn after_action_sp(&self, after: AfterAction) -> u16 {
        match after {
            AfterAction::C1 | AfterAction::C2 | AfterAction::C3 | AfterAction::C4 | AfterAction::C5 => {
                let idx = after.combo_index().expect("after_action_sp: must be a combo step here");
                self.config.combo_stat(idx).sp
            }
            AfterAction::FS => self.config.fs_stat().sp,
            AfterAction::S1 | AfterAction::S2 | AfterAction::S3 | AfterAction::Nothing => 0,
        }
    }

    fn transition(&self, prev: AfterAction, a: Action) -> AfterAction {
        match a {
            Action::FS => AfterAction::FS,
            Action::X => prev.next_combo(),
            Action::S1 => AfterAction::S1,
            Action::S2 => AfterAction::S2,
            Action::S3 => AfterAction::S3,
        }
    }

    fn recovery_frames(&self, prev: AfterAction, a: Action) -> u32 {
        match prev {
            AfterAction::FS => match a {
                Action::X | Action::FS => self.config.fs_stat().recovery as u32,
                _ => 0, // skills cancel out of fs
            },
            AfterAction::C1 | AfterAction::C2 | AfterAction::C3 | AfterAction::C4 | AfterAction::C5 => {
                let idx = prev.combo_index().expect("recovery_frames: prev.after must be a combo step here");
                match a {
                    Action::S1 | Action::S2 | Action::S3 => 0,
                    Action::FS if self.config.weapon_class.xfs_startups.is_some() => 0,
                    _ => self.config.combo_stat(idx).recovery as u32,
                }
            }
            AfterAction::S1 | AfterAction::S2 | AfterAction::S3 => {
                // nothing cancels a skill's own recovery, regardless of `a`.
                let slot = prev.skill_index().expect("recovery_frames: prev.after must be a skill here");
                self.config.skill_stat(slot).recovery as u32
            }
            AfterAction::Nothing => 0,
        }
    }

    fn startup_frames(&self, prev: AfterAction, a: Action, next: AfterAction) -> u32 {
        match a {
            Action::S1 => self.config.skill_stat(0).startup as u32,
            Action::S2 => self.config.skill_stat(1).startup as u32,
            Action::S3 => self.config.skill_stat(2).startup as u32,
            Action::X => {
                let idx = next.combo_index().expect("startup_frames: next.after must be a combo step here");
                self.config.combo_stat(idx).startup as u32
            }
            Action::FS => {
                if let (Some(idx), Some(overrides)) = (prev.combo_index(), self.config.weapon_class.xfs_startups) {
                    overrides[idx] as u32
                } else {
                    self.config.fs_stat().startup as u32
                }
            }
        }
    }

    fn damage(&self, state: AdventurerState, hitting: AfterAction) -> f64 {
        let (damage_percent, skill_factor) = match hitting {
            AfterAction::C1 | AfterAction::C2 | AfterAction::C3 | AfterAction::C4 | AfterAction::C5 => {
                let idx = hitting.combo_index().expect("damage: hitting must be a combo step here");
                (self.config.combo_stat(idx).damage_percent, 1.0)
            }
            AfterAction::FS => (
                self.config.fs_stat().damage_percent,
                1.0 + self.config.modifiers.fs_dmg_mod,
            ),
            AfterAction::S1 | AfterAction::S2 | AfterAction::S3 => {
                let slot = hitting.skill_index().expect("damage: hitting must be a skill here");
                (
                    self.config.skill_stat(slot).damage_percent,
                    (1.0 + self.config.modifiers.skill_dmg_mod) * (1.0 + self.config.modifiers.coability_skill_dmg_mod),
                )
            }
            AfterAction::Nothing => return 0.0,
        };

        let strength_buff_mult = if state.buff_active(STRENGTH_BUFF_SLOT) {
            STRENGTH_BUFF_MULT
        } else {
            1.0
        };
        let crit_dmg = self.config.modifiers.crit_dmg_base
            + if state.buff_active(CRIT_BUFF_SLOT) { CRIT_BUFF_BONUS } else { 0.0 };
        let energized_mult = if state.is_energized() { 1.5 } else { 1.0 };

        (5.0 / 3.0)
            * self.config.adventurer.base_strength
            * (1.0 + self.config.modifiers.strength_mod)
            * (1.0 + self.config.modifiers.coability_strength_mod)
            * strength_buff_mult
            * damage_percent
            / 100.0
            * skill_factor
            / 10.0
            * (1.0 + self.config.modifiers.crit_rate * crit_dmg)
            * 1.5
            * energized_mult
            * (self.effects.damage_multiplier)(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        ActionStat, AdventurerName, AdventurerStat, Modifiers, WeaponClassStat, WeaponKind, WeaponName, WeaponStat,
    };

    fn stat(damage_percent: f64, sp: u16, startup: u16, recovery: u16) -> ActionStat {
        ActionStat { damage_percent, sp, startup, recovery }
    }

    fn axe_config() -> Config {
        Config {
            weapon_class: WeaponClassStat {
                x_stats: [
                    stat(100.0, 0, 10, 20),
                    stat(110.0, 0, 10, 20),
                    stat(120.0, 0, 10, 20),
                    stat(130.0, 0, 10, 20),
                    stat(150.0, 0, 10, 25),
                ],
                fs_stat: stat(200.0, 0, 15, 30),
                xfs_startups: None,
            },
            weapon: WeaponStat { name: WeaponName::Named(1), kind: WeaponKind::Axe, s3_stat: None },
            adventurer: AdventurerStat {
                name: AdventurerName::Generic,
                s1_stat: stat(300.0, 100, 20, 10),
                s2_stat: stat(400.0, 150, 25, 15),
                base_strength: 1000.0,
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
    fn combo_progresses_through_five_steps() {
        let config = axe_config();
        let sim = Simulator::new(&config, 2);
        let mut state = AdventurerState::zero();
        let expected = [
            AfterAction::C1,
            AfterAction::C2,
            AfterAction::C3,
            AfterAction::C4,
            AfterAction::C5,
            AfterAction::C1,
        ];
        for want in expected {
            let (next, frames, _) = sim.apply_action(state, Action::X).expect("x always legal");
            assert_eq!(next.after, want);
            assert!(frames > 0);
            state = next;
        }
    }

    #[test]
    fn skill_illegal_without_sp() {
        let config = axe_config();
        let sim = Simulator::new(&config, 2);
        let state = AdventurerState::zero();
        assert!(sim.apply_action(state, Action::S1).is_none());
    }

    #[test]
    fn skill_after_fs_is_illegal() {
        let config = axe_config();
        let sim = Simulator::new(&config, 2);
        let state = AdventurerState { after: AfterAction::FS, ..AdventurerState::zero() };
        assert!(sim.apply_action(state, Action::S1).is_none());
    }

    #[test]
    fn repeated_fs_is_illegal() {
        let config = axe_config();
        let sim = Simulator::new(&config, 2);
        let state = AdventurerState { after: AfterAction::FS, ..AdventurerState::zero() };
        assert!(sim.apply_action(state, Action::FS).is_none());
    }

    #[test]
    fn skill_legal_once_sp_reached() {
        let config = axe_config();
        let sim = Simulator::new(&config, 2);
        let state = AdventurerState { sp: [100, 0, 0], ..AdventurerState::zero() };
        let (next, _, dmg) = sim.apply_action(state, Action::S1).expect("sp is sufficient");
        assert_eq!(next.after, AfterAction::S1);
        assert_eq!(next.sp[0], 0);
        assert!(dmg > 0.0);
    }
}
