use crate::model::GeoPosition;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// How many fixes the history keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryRetention {
    /// Every fix for the lifetime of the process.
    #[default]
    Unbounded,
    /// Only the newest `n` arrivals.
    MostRecent(usize),
}

/// What happened when a fix was offered to the history.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Admission {
    pub appended: bool,
    pub evicted: Vec<GeoPosition>,
}

/// Append-only, arrival-ordered record of distinct fixes.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<GeoPosition>,
    retention: HistoryRetention,
}

impl History {
    pub fn with_retention(retention: HistoryRetention) -> Self {
        Self {
            entries: VecDeque::new(),
            retention,
        }
    }

    /// Appends `fix` unless an identical fix is already stored, then
    /// evicts the oldest entries the retention policy no longer allows.
    pub fn admit(&mut self, fix: GeoPosition) -> Admission {
        if self.entries.contains(&fix) {
            return Admission::default();
        }
        self.entries.push_back(fix);

        let mut evicted = Vec::new();
        if let HistoryRetention::MostRecent(limit) = self.retention {
            while self.entries.len() > limit.max(1) {
                if let Some(oldest) = self.entries.pop_front() {
                    evicted.push(oldest);
                }
            }
        }
        Admission {
            appended: true,
            evicted,
        }
    }

    pub fn contains_timestamp(&self, timestamp: f64) -> bool {
        self.entries.iter().any(|fix| fix.timestamp == timestamp)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeoPosition> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&GeoPosition> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn retention(&self) -> HistoryRetention {
        self.retention
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(t: f64) -> GeoPosition {
        GeoPosition::new(t * 0.001, 0.0, 10.0, t)
    }

    #[test]
    fn duplicates_are_ignored() {
        let mut history = History::default();
        assert!(history.admit(fix(1.0)).appended);
        assert!(!history.admit(fix(1.0)).appended);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn same_timestamp_different_fix_is_kept() {
        let mut history = History::default();
        history.admit(GeoPosition::new(1.0, 1.0, 0.0, 5.0));
        history.admit(GeoPosition::new(2.0, 1.0, 0.0, 5.0));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn arrival_order_is_preserved() {
        let mut history = History::default();
        for t in [3.0, 1.0, 2.0] {
            history.admit(fix(t));
        }
        let order: Vec<f64> = history.iter().map(|f| f.timestamp).collect();
        assert_eq!(order, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn unbounded_never_evicts() {
        let mut history = History::default();
        for t in 0..1000 {
            assert!(history.admit(fix(t as f64)).evicted.is_empty());
        }
        assert_eq!(history.len(), 1000);
    }

    #[test]
    fn most_recent_evicts_oldest_first() {
        let mut history = History::with_retention(HistoryRetention::MostRecent(2));
        history.admit(fix(1.0));
        history.admit(fix(2.0));
        let admission = history.admit(fix(3.0));
        assert_eq!(admission.evicted, vec![fix(1.0)]);
        assert_eq!(history.last(), Some(&fix(3.0)));
        assert!(!history.contains_timestamp(1.0));
        assert!(history.contains_timestamp(2.0));
    }
}
