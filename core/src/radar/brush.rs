use crate::prelude::{RadarError, RadarResult};
use serde::{Deserialize, Serialize};

/// Inclusive time window of fixes to render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushRange {
    pub start: f64,
    pub end: f64,
}

impl Default for BrushRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl BrushRange {
    pub const fn unbounded() -> Self {
        Self {
            start: 0.0,
            end: f64::INFINITY,
        }
    }

    /// Builds a range from two endpoints in either order.
    pub fn new(x0: f64, x1: f64) -> RadarResult<Self> {
        if x0.is_nan() || x1.is_nan() {
            return Err(RadarError::InvalidInput(format!(
                "brush bounds must be numbers, got [{x0}, {x1}]"
            )));
        }
        let (start, end) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        Ok(Self { start, end })
    }

    pub fn contains(&self, timestamp: f64) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}

/// Ascending, duplicate-free list of every timestamp ingested so far.
#[derive(Debug, Clone, Default)]
pub struct TimeBrushIndex {
    timestamps: Vec<f64>,
}

impl TimeBrushIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the timestamp was already present.
    pub fn insert(&mut self, timestamp: f64) -> bool {
        if self.timestamps.iter().any(|&t| t == timestamp) {
            return false;
        }
        let at = self.timestamps.partition_point(|&t| t < timestamp);
        self.timestamps.insert(at, timestamp);
        true
    }

    pub fn remove(&mut self, timestamp: f64) -> bool {
        match self.timestamps.iter().position(|&t| t == timestamp) {
            Some(at) => {
                self.timestamps.remove(at);
                true
            }
            None => false,
        }
    }

    /// Stored timestamp closest to `t`; on a tie the earlier one wins.
    pub fn nearest(&self, t: f64) -> Option<f64> {
        let mut best: Option<(f64, f64)> = None;
        for &candidate in &self.timestamps {
            let distance = (candidate - t).abs();
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((candidate, distance)),
            }
        }
        best.map(|(timestamp, _)| timestamp)
    }

    /// Snaps both endpoints to stored samples. `None` while the index is empty.
    pub fn snap(&self, x0: f64, x1: f64) -> RadarResult<Option<BrushRange>> {
        let range = BrushRange::new(x0, x1)?;
        match (self.nearest(range.start), self.nearest(range.end)) {
            (Some(start), Some(end)) => BrushRange::new(start, end).map(Some),
            _ => Ok(None),
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.timestamps
    }
}
