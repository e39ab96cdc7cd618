use crate::action::AfterAction;
use crate::config::AdventurerName;
use crate::state::AdventurerState;
use crate::{CRIT_BUFF_FRAMES, ENERGIZED_BUFF_FRAMES, STRENGTH_BUFF_FRAMES};

/// slot indices into `AdventurerState::buff_frames_left`, by convention
/// shared across every adventurer's effects: 0 = strength buff, 1 = crit
/// buff, 2 = energized buff. an adventurer that doesn't grant a given buff
/// simply never refreshes that slot, leaving it permanently at zero.
pub const STRENGTH_BUFF_SLOT: usize = 0;
pub const CRIT_BUFF_SLOT: usize = 1;
pub const ENERGIZED_BUFF_SLOT: usize = 2;

/// a named adventurer's hooks into the simulator's hit-resolution path.
/// replaces a per-adventurer switch statement in the hot loop with a single
/// indirect call resolved once from the loaded configuration.
#[derive(Clone, Copy)]
pub struct AdventurerEffects {
    /// multiplier applied on top of the base damage formula (strength-buff-
    /// style effects that aren't already folded into `buff_frames_left`).
    pub damage_multiplier: fn(AdventurerState) -> f64,
    /// state changes to apply when `after` lands a hit: buff refreshes,
    /// energy accrual, skill-shift rotation.
    pub on_hit: fn(AdventurerState, AfterAction) -> AdventurerState,
}

fn no_multiplier(_state: AdventurerState) -> f64 {
    1.0
}

fn no_op_hit(state: AdventurerState, _after: AfterAction) -> AdventurerState {
    state
}

/// heinwald: casting S3 while an axe combo is active arms a long strength buff.
fn heinwald_on_hit(state: AdventurerState, after: AfterAction) -> AdventurerState {
    match after {
        AfterAction::S3 => state.refresh_buff(STRENGTH_BUFF_SLOT, STRENGTH_BUFF_FRAMES),
        _ => state,
    }
}

/// amane: every hit accrues energy towards the capped multiplier; reaching
/// the cap also refreshes a crit buff.
fn amane_on_hit(state: AdventurerState, _after: AfterAction) -> AdventurerState {
    let mut next = state;
    next.energy = (next.energy + 1).min(crate::ENERGY_CAP);
    if next.is_energized() {
        next = next.refresh_buff(CRIT_BUFF_SLOT, CRIT_BUFF_FRAMES);
    }
    next
}

/// annelie: skills rotate a two-phase shift counter and refresh the
/// energized buff on the phase flip.
fn annelie_on_hit(state: AdventurerState, after: AfterAction) -> AdventurerState {
    let mut next = state;
    if after.skill_index().is_some() {
        next.skill_shift[0] = 1 - next.skill_shift[0];
        if next.skill_shift[0] == 0 {
            next = next.refresh_buff(ENERGIZED_BUFF_SLOT, ENERGIZED_BUFF_FRAMES);
        }
    }
    next
}

/// amane: the chain-coat gauge scales damage continuously as energy builds,
/// on top of (not instead of) the capped energized crit buff that
/// `simulator::damage` already applies generically off `is_energized()`.
fn amane_damage_multiplier(state: AdventurerState) -> f64 {
    1.0 + (state.energy as f64) * 0.02
}

/// annelie: the active shift phase carries a flat damage bonus.
fn annelie_damage_multiplier(state: AdventurerState) -> f64 {
    if state.skill_shift[0] == 1 {
        1.1
    } else {
        1.0
    }
}

pub fn resolve(name: AdventurerName) -> AdventurerEffects {
    match name {
        // heinwald's strength buff is already fully captured generically via
        // `buff_active(STRENGTH_BUFF_SLOT)` in `simulator::damage`.
        AdventurerName::Heinwald => AdventurerEffects {
            damage_multiplier: no_multiplier,
            on_hit: heinwald_on_hit,
        },
        AdventurerName::Amane => AdventurerEffects {
            damage_multiplier: amane_damage_multiplier,
            on_hit: amane_on_hit,
        },
        AdventurerName::Annelie => AdventurerEffects {
            damage_multiplier: annelie_damage_multiplier,
            on_hit: annelie_on_hit,
        },
        AdventurerName::Generic => AdventurerEffects {
            damage_multiplier: no_multiplier,
            on_hit: no_op_hit,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_is_a_no_op() {
        let effects = resolve(AdventurerName::Generic);
        let s = AdventurerState::zero();
        let next = (effects.on_hit)(s, AfterAction::S1);
        assert_eq!(next, s);
        assert_eq!((effects.damage_multiplier)(s), 1.0);
    }

    #[test]
    fn heinwald_s3_arms_strength_buff() {
        let effects = resolve(AdventurerName::Heinwald);
        let s = AdventurerState::zero();
        let next = (effects.on_hit)(s, AfterAction::S3);
        assert!(next.buff_active(STRENGTH_BUFF_SLOT));
    }

    #[test]
    fn amane_multiplier_ramps_with_energy() {
        let effects = resolve(AdventurerName::Amane);
        let low = AdventurerState { energy: 0, ..AdventurerState::zero() };
        let high = AdventurerState { energy: 10, ..AdventurerState::zero() };
        assert_eq!((effects.damage_multiplier)(low), 1.0);
        assert!((effects.damage_multiplier)(high) > 1.0);
    }

    #[test]
    fn annelie_multiplier_follows_shift_phase() {
        let effects = resolve(AdventurerName::Annelie);
        let phase_zero = AdventurerState { skill_shift: [0, 0], ..AdventurerState::zero() };
        let phase_one = AdventurerState { skill_shift: [1, 0], ..AdventurerState::zero() };
        assert_eq!((effects.damage_multiplier)(phase_zero), 1.0);
        assert_eq!((effects.damage_multiplier)(phase_one), 1.1);
    }
}
