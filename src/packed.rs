/// compressed sparse row encoding of an inverse transition relation over
/// `N` nodes (states, or later partitions). for node `n`, predecessors are
/// `states[index[n]..index[n+1]]` paired elementwise with
/// `actions[index[n]..index[n+1]]`. duplicate `(state, action)` pairs for
/// the same target are permitted.
#[derive(Clone, Debug)]
pub struct PackedInverse {
    pub index: Vec<u32>,
    pub states: Vec<u32>,
    pub actions: Vec<u8>,
}

impl PackedInverse {
    /// build from a flat list of `(target, predecessor, action)` edges.
    /// edges need not be sorted by target.
    pub fn build(num_nodes: usize, edges: &[(u32, u32, u8)]) -> Self {
        let mut counts = vec![0u32; num_nodes + 1];
        for &(target, _, _) in edges {
            counts[target as usize + 1] += 1;
        }
        for i in 1..counts.len() {
            counts[i] += counts[i - 1];
        }
        let index = counts.clone();
        let mut cursor = counts;
        let mut states = vec![0u32; edges.len()];
        let mut actions = vec![0u8; edges.len()];
        for &(target, predecessor, action) in edges {
            let at = cursor[target as usize] as usize;
            states[at] = predecessor;
            actions[at] = action;
            cursor[target as usize] += 1;
        }
        let packed = Self { index, states, actions };
        packed.validate(num_nodes);
        packed
    }

    pub fn predecessors(&self, node: usize) -> impl Iterator<Item = (u32, u8)> + '_ {
        let start = self.index[node] as usize;
        let end = self.index[node + 1] as usize;
        self.states[start..end].iter().copied().zip(self.actions[start..end].iter().copied())
    }

    /// checked once after construction and once after minimizer
    /// post-processing; corruption here is a programming error, not a
    /// recoverable condition.
    pub fn validate(&self, num_nodes: usize) {
        assert_eq!(self.index.len(), num_nodes + 1, "index length must be num_nodes + 1");
        assert_eq!(self.states.len(), self.actions.len(), "states/actions length mismatch");
        assert_eq!(*self.index.last().unwrap() as usize, self.states.len(), "index must end at states.len()");
        for w in self.index.windows(2) {
            assert!(w[0] <= w[1], "index must be monotonically non-decreasing");
        }
        for &s in &self.states {
            assert!((s as usize) < num_nodes, "predecessor state index out of range");
        }
    }
}
