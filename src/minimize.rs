use crate::packed::PackedInverse;
use std::collections::{HashSet, VecDeque};

pub struct HopcroftInput {
    pub inverse: PackedInverse,
    pub num_states: u32,
    pub num_actions: u8,
    pub initial_partition: Vec<u32>,
}

pub struct HopcroftOutput {
    pub partition: Vec<u32>,
    pub num_partitions: u32,
}

/// hopcroft partition refinement over the inverse transition relation,
/// adapted for a partial, non-injective transition function (the stock
/// algorithm assumes a total dfa; working on predecessors via the inverse
/// relation handles illegal transitions for free: an action simply has no
/// predecessor entry for a state from which it's illegal).
pub fn minimize(input: HopcroftInput) -> HopcroftOutput {
    input.inverse.validate(input.num_states as usize);

    let num_blocks_initial = input.initial_partition.iter().copied().max().map(|m| m + 1).unwrap_or(0);
    for &b in &input.initial_partition {
        debug_assert!(b < num_blocks_initial, "initial partition block id out of range");
    }

    let mut partition = input.initial_partition;
    let mut blocks: Vec<HashSet<u32>> = vec![HashSet::new(); num_blocks_initial as usize];
    for (state, &block) in partition.iter().enumerate() {
        blocks[block as usize].insert(state as u32);
    }

    let mut worklist: VecDeque<(u32, u8)> = VecDeque::new();
    let mut queued: HashSet<(u32, u8)> = HashSet::new();
    for block in 0..blocks.len() as u32 {
        for action in 0..input.num_actions {
            worklist.push_back((block, action));
            queued.insert((block, action));
        }
    }

    while let Some((p, a)) = worklist.pop_front() {
        queued.remove(&(p, a));
        if blocks[p as usize].is_empty() {
            continue;
        }

        // predecessors of block(p) under action a
        let mut inv: HashSet<u32> = HashSet::new();
        for &t in &blocks[p as usize] {
            for (s, edge_action) in input.inverse.predecessors(t as usize) {
                if edge_action == a {
                    inv.insert(s);
                }
            }
        }
        if inv.is_empty() {
            continue;
        }

        let mut touched: HashSet<u32> = HashSet::new();
        for &s in &inv {
            touched.insert(partition[s as usize]);
        }

        for q in touched {
            let block_q = &blocks[q as usize];
            let intersection: HashSet<u32> = block_q.intersection(&inv).copied().collect();
            if intersection.is_empty() || intersection.len() == block_q.len() {
                continue;
            }

            let r = blocks.len() as u32;
            let remainder: HashSet<u32> = block_q.difference(&intersection).copied().collect();
            for &s in &intersection {
                partition[s as usize] = r;
            }
            blocks[q as usize] = remainder;
            blocks.push(intersection);

            for action in 0..input.num_actions {
                if queued.contains(&(q, action)) {
                    if queued.insert((r, action)) {
                        worklist.push_back((r, action));
                    }
                } else {
                    let smaller = if blocks[q as usize].len() <= blocks[r as usize].len() { q } else { r };
                    if queued.insert((smaller, action)) {
                        worklist.push_back((smaller, action));
                    }
                }
            }
        }
    }

    // compact away empty blocks left behind by splits, renumbering densely.
    let mut remap = vec![u32::MAX; blocks.len()];
    let mut next_id = 0u32;
    for (old, block) in blocks.iter().enumerate() {
        if !block.is_empty() {
            remap[old] = next_id;
            next_id += 1;
        }
    }
    for b in partition.iter_mut() {
        *b = remap[*b as usize];
    }

    HopcroftOutput { partition, num_partitions: next_id }
}

/// recompute the inverse relation over partitions (not a projection: a
/// predecessor's own block may differ per original edge, so every edge is
/// re-derived and deduplicated). also picks a representative original
/// state per partition, last-assignment-wins.
pub fn partition_inverse(
    partition: &[u32],
    original: &PackedInverse,
    num_partitions: u32,
) -> (PackedInverse, Vec<u32>) {
    let mut representative = vec![0u32; num_partitions as usize];
    for (state, &block) in partition.iter().enumerate() {
        representative[block as usize] = state as u32;
    }

    let mut seen: HashSet<(u32, u32, u8)> = HashSet::new();
    let mut edges: Vec<(u32, u32, u8)> = Vec::new();
    for target in 0..partition.len() {
        let q = partition[target];
        for (s, action) in original.predecessors(target) {
            let p = partition[s as usize];
            if seen.insert((p, q, action)) {
                edges.push((q, p, action));
            }
        }
    }

    (PackedInverse::build(num_partitions as usize, &edges), representative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_identical_behavior_states() {
        // two states (0,1) both go to 2 under action 0; 2 has no outgoing edges.
        // they're behaviorally identical and should end up in the same block.
        let edges = [(2u32, 0u32, 0u8), (2, 1, 0)];
        let inverse = PackedInverse::build(3, &edges);
        let input = HopcroftInput {
            inverse,
            num_states: 3,
            num_actions: 1,
            initial_partition: vec![0, 0, 1],
        };
        let out = minimize(input);
        assert_eq!(out.partition[0], out.partition[1]);
    }

    #[test]
    fn distinguishes_states_with_different_successors() {
        // 0 -a-> 2, 1 -a-> 3, and 2/3 start in different blocks: 0 and 1 must
        // end up distinguished.
        let edges = [(2u32, 0u32, 0u8), (3, 1, 0)];
        let inverse = PackedInverse::build(4, &edges);
        let input = HopcroftInput {
            inverse,
            num_states: 4,
            num_actions: 1,
            initial_partition: vec![0, 0, 1, 2],
        };
        let out = minimize(input);
        assert_ne!(out.partition[0], out.partition[1]);
    }
}
