//! Tab stop bookkeeping.
//!
//! One flag per buffer column. A fresh set places a stop every 8 columns,
//! which is what every terminal since the VT100 has done by default.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabStops {
    stops: Vec<bool>,
}

impl TabStops {
    pub fn new(cols: usize) -> Self {
        let mut stops = vec![false; cols];
        for i in (0..cols).step_by(8) {
            stops[i] = true;
        }
        TabStops { stops }
    }

    pub fn set(&mut self, col: usize) {
        if col < self.stops.len() {
            self.stops[col] = true;
        }
    }

    pub fn clear(&mut self, col: usize) {
        if col < self.stops.len() {
            self.stops[col] = false;
        }
    }

    pub fn clear_all(&mut self) {
        for stop in &mut self.stops {
            *stop = false;
        }
    }

    pub fn is_set(&self, col: usize) -> bool {
        self.stops.get(col).copied().unwrap_or(false)
    }

    /// The column reached by tabbing forward `count` times from `col`,
    /// stopping at the last column when the stops run out.
    pub fn next_stop(&self, col: usize, count: usize) -> usize {
        let last = self.stops.len().saturating_sub(1);
        let mut current = col;
        for _ in 0..count {
            match ((current + 1)..self.stops.len()).find(|&i| self.stops[i]) {
                Some(stop) => current = stop,
                None => return last,
            }
        }
        current
    }

    /// The column reached by tabbing backward `count` times from `col`,
    /// stopping at column 0 when the stops run out.
    pub fn prev_stop(&self, col: usize, count: usize) -> usize {
        let mut current = col;
        for _ in 0..count {
            match (0..current.min(self.stops.len())).rev().find(|&i| self.stops[i]) {
                Some(stop) => current = stop,
                None => return 0,
            }
        }
        current
    }

    /// Resize to a new column count; new columns get the default 8-column stops.
    pub fn resize(&mut self, cols: usize) {
        let old = self.stops.len();
        self.stops.resize(cols, false);
        for i in old..cols {
            if i % 8 == 0 {
                self.stops[i] = true;
            }
        }
    }
}
