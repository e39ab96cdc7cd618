use crate::action::Action;
use crate::packed::PackedInverse;
use crate::simulator::Simulator;
use crate::state::AdventurerState;
use std::collections::HashMap;

/// everything the minimizer needs: a dense numbering of the reachable
/// states, the initial state's id, and the packed inverse relation over
/// that numbering.
pub struct StateSpace {
    pub state_decode: Vec<AdventurerState>,
    pub initial: u32,
    pub inverse: PackedInverse,
}

/// explore every state reachable from `initial` by repeated legal action
/// application, recording inverse edges as we go. a stack-driven walk
/// (depth-first via a `Vec` LIFO), not queue-driven — order of discovery
/// doesn't affect the resulting relation.
pub fn explore(sim: &Simulator, initial: AdventurerState) -> StateSpace {
    let mut state_encode: HashMap<AdventurerState, u32> = HashMap::new();
    let mut state_decode: Vec<AdventurerState> = Vec::new();
    let mut stack: Vec<AdventurerState> = Vec::new();
    let mut edges: Vec<(u32, u32, u8)> = Vec::new(); // (target, predecessor, action)

    let initial_id = *state_encode.entry(initial).or_insert_with(|| {
        state_decode.push(initial);
        (state_decode.len() - 1) as u32
    });
    stack.push(initial);

    while let Some(s) = stack.pop() {
        let sid = state_encode[&s];
        for a in Action::ALL {
            let Some((next, _frames, _damage)) = sim.apply_action(s, a) else { continue };
            let next_id = *state_encode.entry(next).or_insert_with(|| {
                state_decode.push(next);
                stack.push(next);
                (state_decode.len() - 1) as u32
            });
            edges.push((next_id, sid, a.index() as u8));
        }
    }

    let inverse = PackedInverse::build(state_decode.len(), &edges);
    StateSpace { state_decode, initial: initial_id, inverse }
}

/// the coarsened equivalence key used to seed the initial hopcroft
/// partition: sp is zeroed, buff presence is booleanized, energy is
/// reduced to whether it's maxed out. any coarsening that doesn't merge
/// distinguishable states is sound; this one is already close to the
/// eventual fixed point.
pub fn initial_partition(states: &[AdventurerState]) -> Vec<u32> {
    let mut keys: HashMap<(crate::action::AfterAction, u8, [bool; 3], bool, [u8; 2]), u32> = HashMap::new();
    let mut partition = Vec::with_capacity(states.len());
    for s in states {
        let key = (
            s.after,
            s.ui_hidden_frames_left,
            [s.buff_frames_left[0] > 0, s.buff_frames_left[1] > 0, s.buff_frames_left[2] > 0],
            s.is_energized(),
            s.skill_shift,
        );
        let next_id = keys.len() as u32;
        let id = *keys.entry(key).or_insert(next_id);
        partition.push(id);
    }
    partition
}
