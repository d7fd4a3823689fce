//! Priority queue of discovered but not yet settled nodes.
//!
//! There is no decrease-key: an improved node is pushed again with its new cost and a fresh
//! sequence number, so the same node may sit in the queue several times. Whoever pops is expected
//! to discard entries for nodes it has already settled.
use fxhash::FxHashMap;
use std::cmp::Ordering;
use std::collections::hash_map::Entry::Occupied;
use std::collections::BinaryHeap;
use std::hash::Hash;

use crate::error::EmptyFrontier;

/// A popped frontier entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrontierEntry<N, C> {
    pub cost: C,
    /// Insertion order, unique per frontier.
    pub seq: u64,
    pub node: N,
}

struct SmallestCostHolder<N, C>(FrontierEntry<N, C>);

impl<N, C: PartialEq> Eq for SmallestCostHolder<N, C> {}

impl<N, C: PartialEq> PartialEq for SmallestCostHolder<N, C> {
    fn eq(&self, other: &Self) -> bool {
        self.0.cost.eq(&other.0.cost) && self.0.seq == other.0.seq
    }
}

impl<N, C: Ord> PartialOrd for SmallestCostHolder<N, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N, C: Ord> Ord for SmallestCostHolder<N, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for the max-heap: lowest cost first, then the earliest inserted
        match other.0.cost.cmp(&self.0.cost) {
            Ordering::Equal => other.0.seq.cmp(&self.0.seq),
            s => s,
        }
    }
}

pub struct Frontier<N, C> {
    heap: BinaryHeap<SmallestCostHolder<N, C>>,
    next_seq: u64,
    // Number of queued entries per node, duplicates included
    live: FxHashMap<N, usize>,
}

impl<N, C> Default for Frontier<N, C>
where
    N: Eq + Hash + Clone,
    C: Ord + Copy,
{
    fn default() -> Self {
        Frontier::new()
    }
}

impl<N, C> Frontier<N, C>
where
    N: Eq + Hash + Clone,
    C: Ord + Copy,
{
    pub fn new() -> Frontier<N, C> {
        Frontier {
            heap: BinaryHeap::new(),
            next_seq: 0,
            live: FxHashMap::default(),
        }
    }
    /// Inserts `node` with priority `cost` and returns the sequence number it was given.
    pub fn push(&mut self, cost: C, node: N) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        *self.live.entry(node.clone()).or_insert(0) += 1;
        self.heap.push(SmallestCostHolder(FrontierEntry { cost, seq, node }));
        seq
    }
    /// Removes the entry with the smallest cost. Among equal costs the entry pushed first wins.
    pub fn pop_min(&mut self) -> Result<FrontierEntry<N, C>, EmptyFrontier> {
        let SmallestCostHolder(entry) = self.heap.pop().ok_or(EmptyFrontier)?;
        if let Occupied(mut e) = self.live.entry(entry.node.clone()) {
            if *e.get() <= 1 {
                e.remove();
            } else {
                *e.get_mut() -= 1;
            }
        }
        Ok(entry)
    }
    /// Whether at least one entry for `node` is still queued.
    pub fn contains(&self, node: &N) -> bool {
        self.live.contains_key(node)
    }
    /// Number of queued entries, duplicates included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
    /// Number of distinct nodes with at least one queued entry.
    pub fn distinct_len(&self) -> usize {
        self.live.len()
    }
    #[cfg(test)]
    fn count(&self, node: &N) -> usize {
        match self.live.get(node) {
            Some(&n) => n,
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_cost_order() {
        let mut frontier = Frontier::new();
        frontier.push(3, 'c');
        frontier.push(1, 'a');
        frontier.push(2, 'b');
        let order: Vec<char> = std::iter::from_fn(|| frontier.pop_min().ok())
            .map(|e| e.node)
            .collect();
        assert_eq!(order, vec!['a', 'b', 'c']);
    }

    /// Equal costs come out first-in first-out.
    #[test]
    fn ties_broken_by_insertion_order() {
        let mut frontier = Frontier::new();
        for node in ['d', 'a', 'c', 'b'] {
            frontier.push(5, node);
        }
        frontier.push(4, 'z');
        assert_eq!(frontier.pop_min().unwrap().node, 'z');
        let order: Vec<(char, u64)> = std::iter::from_fn(|| frontier.pop_min().ok())
            .map(|e| (e.node, e.seq))
            .collect();
        assert_eq!(order, vec![('d', 0), ('a', 1), ('c', 2), ('b', 3)]);
    }

    #[test]
    fn empty_pop_fails() {
        let mut frontier: Frontier<u8, u32> = Frontier::new();
        assert_eq!(frontier.pop_min(), Err(EmptyFrontier));
        frontier.push(0, 1);
        assert!(frontier.pop_min().is_ok());
        assert_eq!(frontier.pop_min(), Err(EmptyFrontier));
    }

    /// Membership survives until the last duplicate of a node is popped.
    #[test]
    fn contains_tracks_duplicates() {
        let mut frontier = Frontier::new();
        frontier.push(4, (1, 1));
        frontier.push(2, (1, 1));
        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.distinct_len(), 1);
        assert_eq!(frontier.count(&(1, 1)), 2);
        let first = frontier.pop_min().unwrap();
        assert_eq!(first.cost, 2);
        assert!(frontier.contains(&(1, 1)));
        frontier.pop_min().unwrap();
        assert!(!frontier.contains(&(1, 1)));
        assert!(frontier.is_empty());
    }

    #[test]
    fn sequence_numbers_survive_pops() {
        let mut frontier = Frontier::new();
        assert_eq!(frontier.push(1, 'a'), 0);
        frontier.pop_min().unwrap();
        assert_eq!(frontier.push(1, 'a'), 1);
        assert_eq!(frontier.push(0, 'b'), 2);
        assert_eq!(frontier.pop_min().unwrap().seq, 2);
    }
}
