use std::collections::VecDeque;
use std::time::SystemTime;

use log::debug;

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// One successful calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub id: u64,
    pub expression: String,
    pub result: f64,
    pub timestamp: SystemTime,
}

/// Bounded, chronological log of calculations.
///
/// When full, adding an entry evicts the oldest one. Ids keep counting
/// up across evictions and [`History::clear`], so an id is never handed
/// out twice by the same log.
#[derive(Debug)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    next_id: u64,
}

impl History {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        History {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 1,
        }
    }

    pub fn add(&mut self, expression: &str, result: f64) {
        while self.entries.len() >= self.capacity {
            if let Some(evicted) = self.entries.pop_front() {
                debug!("history full, evicting entry #{}", evicted.id);
            }
        }

        let entry = HistoryEntry {
            id: self.next_id,
            expression: expression.to_string(),
            result,
            timestamp: SystemTime::now(),
        };
        self.next_id += 1;
        self.entries.push_back(entry);
    }

    /// Snapshot of all entries, oldest first.
    pub fn get_all(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for History {
    fn default() -> Self {
        History::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_chronological_with_increasing_ids() {
        let mut history = History::new(10);
        history.add("1 + 1", 2.0);
        history.add("2 * 3", 6.0);

        let all = history.get_all();
        assert_eq!(all.len(), 2);
        assert_eq!((all[0].id, all[0].expression.as_str(), all[0].result), (1, "1 + 1", 2.0));
        assert_eq!((all[1].id, all[1].expression.as_str(), all[1].result), (2, "2 * 3", 6.0));
        assert!(all[0].timestamp <= all[1].timestamp);
    }

    #[test]
    fn oldest_entries_are_evicted_first() {
        let mut history = History::new(3);
        for i in 1..=5 {
            history.add(&i.to_string(), i as f64);
        }

        let ids: Vec<u64> = history.get_all().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 4, 5]);
        assert_eq!(history.len(), 3);
        assert_eq!(history.last().map(|e| e.result), Some(5.0));
    }

    #[test]
    fn snapshot_is_detached() {
        let mut history = History::new(5);
        history.add("1", 1.0);

        let mut snapshot = history.get_all();
        snapshot.clear();
        snapshot.push(HistoryEntry {
            id: 99,
            expression: "bogus".to_string(),
            result: 0.0,
            timestamp: SystemTime::now(),
        });

        let all = history.get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].expression, "1");
    }

    #[test]
    fn clear_keeps_the_id_counter() {
        let mut history = History::new(5);
        history.add("1", 1.0);
        history.add("2", 2.0);
        history.clear();
        assert!(history.is_empty());

        history.add("3", 3.0);
        assert_eq!(history.get_all()[0].id, 3);
    }

    #[test]
    fn zero_capacity_keeps_one_entry() {
        let mut history = History::new(0);
        assert_eq!(history.capacity(), 1);
        history.add("1", 1.0);
        history.add("2", 2.0);
        assert_eq!(history.get_all().len(), 1);
        assert_eq!(history.get_all()[0].expression, "2");
    }

    #[test]
    fn default_capacity() {
        assert_eq!(History::default().capacity(), DEFAULT_HISTORY_CAPACITY);
    }
}
