//! Maximum matching in a general graph (Edmonds' blossom algorithm).
//!
//! Used by the pairing engine to decide for certain whether a pool can be
//! paired when its bounded search gives up.

use std::collections::VecDeque;

/// Maximum cardinality matching over vertices `0..size`
///
/// `allowed` must be symmetric. Returns the mate of each vertex, if any.
/// Runs in O(n³).
pub(super) fn maximum_matching<F>(size: usize, allowed: F) -> Vec<Option<usize>>
where
    F: Fn(usize, usize) -> bool,
{
    let mut search = BlossomSearch {
        size,
        allowed,
        mate: vec![None; size],
        parent: vec![None; size],
        base: (0..size).collect(),
        in_tree: vec![false; size],
        in_blossom: vec![false; size],
        queue: VecDeque::with_capacity(size),
    };

    for root in 0..size {
        if search.mate[root].is_some() {
            continue;
        }
        if let Some(end) = search.augmenting_path(root) {
            search.augment(end);
        }
    }

    search.mate
}

struct BlossomSearch<F> {
    size: usize,
    allowed: F,
    mate: Vec<Option<usize>>,
    /// Alternating tree parent of odd vertices
    parent: Vec<Option<usize>>,
    /// Base vertex of the contracted blossom each vertex belongs to
    base: Vec<usize>,
    /// Even vertices reached by the current search
    in_tree: Vec<bool>,
    in_blossom: Vec<bool>,
    queue: VecDeque<usize>,
}

impl<F> BlossomSearch<F>
where
    F: Fn(usize, usize) -> bool,
{
    /// Grow an alternating tree from `root`; returns the free vertex that ends
    /// an augmenting path
    fn augmenting_path(&mut self, root: usize) -> Option<usize> {
        self.in_tree.fill(false);
        self.parent.fill(None);
        for (vertex, base) in self.base.iter_mut().enumerate() {
            *base = vertex;
        }
        self.queue.clear();

        self.in_tree[root] = true;
        self.queue.push_back(root);

        while let Some(vertex) = self.queue.pop_front() {
            for to in 0..self.size {
                if vertex == to
                    || !(self.allowed)(vertex, to)
                    || self.base[vertex] == self.base[to]
                    || self.mate[vertex] == Some(to)
                {
                    continue;
                }

                let closes_odd_cycle =
                    to == root || self.mate[to].is_some_and(|m| self.parent[m].is_some());
                if closes_odd_cycle {
                    self.contract(vertex, to);
                } else if self.parent[to].is_none() {
                    self.parent[to] = Some(vertex);
                    match self.mate[to] {
                        None => return Some(to),
                        Some(next) => {
                            self.in_tree[next] = true;
                            self.queue.push_back(next);
                        }
                    }
                }
            }
        }

        None
    }

    fn contract(&mut self, vertex: usize, to: usize) {
        let ancestor = self.common_ancestor(vertex, to);
        self.in_blossom.fill(false);
        self.mark_path(vertex, ancestor, to);
        self.mark_path(to, ancestor, vertex);

        for v in 0..self.size {
            if self.in_blossom[self.base[v]] {
                self.base[v] = ancestor;
                if !self.in_tree[v] {
                    self.in_tree[v] = true;
                    self.queue.push_back(v);
                }
            }
        }
    }

    fn common_ancestor(&self, mut a: usize, mut b: usize) -> usize {
        let mut seen = vec![false; self.size];
        loop {
            a = self.base[a];
            seen[a] = true;
            match self.mate[a].and_then(|m| self.parent[m]) {
                Some(next) => a = next,
                None => break,
            }
        }
        loop {
            b = self.base[b];
            if seen[b] {
                return b;
            }
            match self.mate[b].and_then(|m| self.parent[m]) {
                Some(next) => b = next,
                None => return b,
            }
        }
    }

    fn mark_path(&mut self, mut vertex: usize, ancestor: usize, mut child: usize) {
        while self.base[vertex] != ancestor {
            let Some(mate) = self.mate[vertex] else {
                break;
            };
            self.in_blossom[self.base[vertex]] = true;
            self.in_blossom[self.base[mate]] = true;
            self.parent[vertex] = Some(child);
            child = mate;
            let Some(next) = self.parent[mate] else {
                break;
            };
            vertex = next;
        }
    }

    /// Flip matched and unmatched edges along the path ending at `end`
    fn augment(&mut self, mut end: usize) {
        while let Some(previous) = self.parent[end] {
            let next = self.mate[previous];
            self.mate[end] = Some(previous);
            self.mate[previous] = Some(end);
            match next {
                Some(next) => end = next,
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(list: &[(usize, usize)]) -> impl Fn(usize, usize) -> bool + '_ {
        move |a, b| list.iter().any(|&(x, y)| (x, y) == (a, b) || (y, x) == (a, b))
    }

    fn assert_valid(mate: &[Option<usize>], allowed: impl Fn(usize, usize) -> bool) {
        for (vertex, partner) in mate.iter().enumerate() {
            if let Some(partner) = *partner {
                assert_eq!(mate[partner], Some(vertex));
                assert!(allowed(vertex, partner));
            }
        }
    }

    fn matched(mate: &[Option<usize>]) -> usize {
        mate.iter().filter(|m| m.is_some()).count()
    }

    #[test]
    fn test_empty_graph() {
        assert!(maximum_matching(0, |_, _| true).is_empty());
        assert_eq!(maximum_matching(3, |_, _| false), vec![None; 3]);
    }

    #[test]
    fn test_complete_graph() {
        let mate = maximum_matching(6, |a, b| a != b);
        assert_valid(&mate, |a, b| a != b);
        assert_eq!(matched(&mate), 6);
    }

    #[test]
    fn test_odd_cycle_with_pendant() {
        // Five-cycle 0..4 plus a pendant 5 hanging off 4
        let list = [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0), (4, 5)];
        let mate = maximum_matching(6, edges(&list));
        assert_valid(&mate, edges(&list));
        assert_eq!(matched(&mate), 6);
        assert_eq!(mate[5], Some(4));
    }

    #[test]
    fn test_blossom_needs_contraction() {
        // Triangle 1,2,3 with a tail on each corner
        let list = [(0, 1), (1, 2), (2, 3), (3, 1), (2, 4), (3, 5), (4, 5)];
        let mate = maximum_matching(6, edges(&list));
        assert_valid(&mate, edges(&list));
        assert_eq!(matched(&mate), 6);
    }

    #[test]
    fn test_two_triangles_leave_two_unmatched() {
        let list = [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)];
        let mate = maximum_matching(6, edges(&list));
        assert_valid(&mate, edges(&list));
        assert_eq!(matched(&mate), 4);
    }
}
