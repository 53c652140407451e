use alloc::vec::Vec;

/// Binary indexed tree over pane lengths.
///
/// `node[i]` (1-based) covers the `lsb(i)` lengths ending at pane `i - 1`.
#[derive(Clone, Debug, Default)]
pub(crate) struct Fenwick {
    node: Vec<usize>,
    total: usize,
    top_step: usize,
}

impl Fenwick {
    pub(crate) fn from_lens(lens: &[usize]) -> Self {
        let mut node = Vec::with_capacity(lens.len() + 1);
        node.push(0);
        node.extend_from_slice(lens);
        for i in 1..node.len() {
            let parent = i + lsb(i);
            if parent < node.len() {
                node[parent] += node[i];
            }
        }
        Self {
            node,
            total: lens.iter().sum(),
            top_step: top_step_for(lens.len()),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.node.len().saturating_sub(1)
    }

    /// Appends a pane length.
    pub(crate) fn push(&mut self, value: usize) {
        if self.node.is_empty() {
            self.node.push(0);
        }
        let i = self.node.len();
        // Fold in the children: nodes i-1, i-2, i-4, ... down to (but excluding) i - lsb(i).
        let floor = i - lsb(i);
        let mut covered = value;
        let mut child = i - 1;
        while child > floor {
            covered += self.node[child];
            child -= lsb(child);
        }
        self.node.push(covered);
        self.total += value;
        self.top_step = top_step_for(i);
    }

    /// Changes pane `index` from `old` to `new`.
    pub(crate) fn replace(&mut self, index: usize, old: usize, new: usize) {
        let n = self.len();
        if index >= n || old == new {
            return;
        }
        let mut i = index + 1;
        while i <= n {
            debug_assert!(self.node[i] >= old, "pane sum underflow at node {i}");
            self.node[i] = self.node[i] - old + new;
            i += lsb(i);
        }
        self.total = self.total - old + new;
    }

    /// Sum of the first `count` pane lengths.
    pub(crate) fn prefix_sum(&self, count: usize) -> usize {
        let mut i = count.min(self.len());
        let mut sum = 0;
        while i > 0 {
            sum += self.node[i];
            i &= i - 1;
        }
        sum
    }

    pub(crate) fn total(&self) -> usize {
        self.total
    }

    /// Number of leading panes whose combined length is `<= target`.
    ///
    /// For an in-range flat index this is the pane that holds it; empty panes never win
    /// because they do not move the prefix sum.
    pub(crate) fn panes_before(&self, mut target: usize) -> usize {
        let n = self.len();
        let mut pos = 0;
        let mut step = self.top_step;
        while step > 0 {
            let next = pos + step;
            if next <= n && self.node[next] <= target {
                target -= self.node[next];
                pos = next;
            }
            step >>= 1;
        }
        pos
    }
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

/// Largest power of two `<= n`, or `0` for an empty tree.
fn top_step_for(n: usize) -> usize {
    if n == 0 { 0 } else { 1 << n.ilog2() }
}
