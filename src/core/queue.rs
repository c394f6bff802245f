use keyed_priority_queue::KeyedPriorityQueue;
use rustc_hash::FxHashMap;
use std::{cmp::Ordering, collections::VecDeque};

use super::{error::QueueError, state::Process};

/// Extracts an ordering key from a queued item.
pub type KeyFn<T, K> = fn(&T) -> K;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeapKey<K> {
    primary: K,
    secondary: Option<K>,
    seq: u64,
}

// KeyedPriorityQueue is a max-heap, so the ordering is flipped to pop the minimum
impl<K: Ord> PartialOrd for HeapKey<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for HeapKey<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .primary
            .cmp(&self.primary)
            .then_with(|| other.secondary.cmp(&self.secondary))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-heap ordered by one or two caller-supplied keys.
///
/// Keys are computed once at push time. Items whose keys are mutated while
/// queued must be taken out with [`PriorityQueue::drain_unordered`] and put
/// back with [`PriorityQueue::rebuild_from`]. Equal keys fall back to
/// insertion order.
#[derive(Debug)]
pub struct PriorityQueue<T, K: Ord = u64> {
    // seq --> ordering key
    heap: KeyedPriorityQueue<u64, HeapKey<K>>,
    // seq --> payload
    items: FxHashMap<u64, T>,
    primary: KeyFn<T, K>,
    secondary: Option<KeyFn<T, K>>,
    next_seq: u64,
}

impl<T, K: Ord + Copy> PriorityQueue<T, K> {
    pub fn new(primary: KeyFn<T, K>) -> Self {
        Self {
            heap: KeyedPriorityQueue::new(),
            items: FxHashMap::default(),
            primary,
            secondary: None,
            next_seq: 0,
        }
    }

    pub fn with_secondary(primary: KeyFn<T, K>, secondary: KeyFn<T, K>) -> Self {
        Self {
            secondary: Some(secondary),
            ..Self::new(primary)
        }
    }

    fn key_of(&self, item: &T) -> (K, Option<K>) {
        ((self.primary)(item), self.secondary.map(|key| key(item)))
    }

    pub fn push(&mut self, item: T) {
        let (primary, secondary) = self.key_of(&item);
        let seq = self.next_seq;
        self.next_seq += 1;

        self.heap.push(
            seq,
            HeapKey {
                primary,
                secondary,
                seq,
            },
        );
        self.items.insert(seq, item);
    }

    pub fn pop(&mut self) -> Result<T, QueueError> {
        let (seq, _) = self.heap.pop().ok_or(QueueError::Empty)?;
        self.items.remove(&seq).ok_or(QueueError::NotFound)
    }

    pub fn peek(&self) -> Result<&T, QueueError> {
        let (seq, _) = self.heap.peek().ok_or(QueueError::Empty)?;
        self.items.get(seq).ok_or(QueueError::NotFound)
    }

    /// Removes one entry whose payload equals `item` and whose stored keys
    /// match the keys `item` has now.
    pub fn remove(&mut self, item: &T) -> Result<T, QueueError>
    where
        T: PartialEq,
    {
        let (primary, secondary) = self.key_of(item);
        let seq = self
            .items
            .iter()
            .filter(|(_, candidate)| *candidate == item)
            .map(|(&seq, _)| seq)
            .find(|seq| {
                self.heap
                    .get_priority(seq)
                    .is_some_and(|key| key.primary == primary && key.secondary == secondary)
            })
            .ok_or(QueueError::NotFound)?;

        self.heap.remove(&seq);
        self.items.remove(&seq).ok_or(QueueError::NotFound)
    }

    /// Replaces the queue contents with `items`, keyed afresh.
    pub fn rebuild_from(&mut self, items: impl IntoIterator<Item = T>) {
        self.heap = KeyedPriorityQueue::new();
        self.items.clear();
        for item in items {
            self.push(item);
        }
    }

    /// Empties the queue, returning payloads in insertion order rather than
    /// key order. Feeding the result to [`PriorityQueue::rebuild_from`] keeps
    /// ties resolved the way they were before.
    pub fn drain_unordered(&mut self) -> Vec<T> {
        let mut order: Vec<u64> = self.items.keys().copied().collect();
        order.sort_unstable();
        self.heap = KeyedPriorityQueue::new();
        order
            .into_iter()
            .filter_map(|seq| self.items.remove(&seq))
            .collect()
    }

    pub fn iter_unordered(&self) -> impl Iterator<Item = &T> + '_ {
        self.heap
            .iter()
            .filter_map(|(seq, _)| self.items.get(seq))
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Holds the processes eligible for dispatch.
#[derive(Debug)]
pub enum ReadyQueue {
    Fifo { processes: VecDeque<Process> },
    Priq { processes: PriorityQueue<Process> },
}

impl ReadyQueue {
    pub fn new_fifo() -> Self {
        Self::Fifo {
            processes: VecDeque::new(),
        }
    }

    pub fn new_priq(primary: KeyFn<Process, u64>) -> Self {
        Self::Priq {
            processes: PriorityQueue::new(primary),
        }
    }

    pub fn new_priq_with_secondary(
        primary: KeyFn<Process, u64>,
        secondary: KeyFn<Process, u64>,
    ) -> Self {
        Self::Priq {
            processes: PriorityQueue::with_secondary(primary, secondary),
        }
    }

    pub fn push(&mut self, process: Process) {
        match self {
            Self::Fifo { processes } => processes.push_back(process),
            Self::Priq { processes } => processes.push(process),
        }
    }

    pub fn pop(&mut self) -> Result<Process, QueueError> {
        match self {
            Self::Fifo { processes } => processes.pop_front().ok_or(QueueError::Empty),
            Self::Priq { processes } => processes.pop(),
        }
    }

    pub fn peek(&self) -> Result<&Process, QueueError> {
        match self {
            Self::Fifo { processes } => processes.front().ok_or(QueueError::Empty),
            Self::Priq { processes } => processes.peek(),
        }
    }

    /// Applies `f` to every resident and restores queue order afterwards.
    pub fn update_all(&mut self, mut f: impl FnMut(&mut Process)) {
        match self {
            Self::Fifo { processes } => processes.iter_mut().for_each(f),
            Self::Priq { processes } => {
                let mut residents = processes.drain_unordered();
                residents.iter_mut().for_each(&mut f);
                processes.rebuild_from(residents);
            }
        }
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = &Process> + '_> {
        match self {
            Self::Fifo { processes } => Box::new(processes.iter()),
            Self::Priq { processes } => Box::new(processes.iter_unordered()),
        }
    }

    pub fn drain(&mut self) -> Vec<Process> {
        match self {
            Self::Fifo { processes } => processes.drain(..).collect(),
            Self::Priq { processes } => processes.drain_unordered(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Fifo { processes } => processes.is_empty(),
            Self::Priq { processes } => processes.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Fifo { processes } => processes.len(),
            Self::Priq { processes } => processes.len(),
        }
    }
}
