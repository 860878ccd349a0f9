//! Real closed intervals and ordered interval sets.
//!
//! An [`IntervalSet`] keeps a sorted list of disjoint intervals; insertion
//! merges anything that overlaps or whose endpoints are almost equal, so
//! sampling noise at the 5-digit precision never splits a band in two.

use crate::angles::almost_equals;
use serde::{Deserialize, Serialize};

/// Closed real interval `[lb, ub]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub lb: f64,
    pub ub: f64,
}

impl Interval {
    pub fn new(lb: f64, ub: f64) -> Self {
        Self { lb, ub }
    }

    pub fn length(&self) -> f64 {
        self.ub - self.lb
    }
}

/// Ordered set of disjoint real intervals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntervalSet {
    intervals: Vec<Interval>,
}

impl IntervalSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Sum of the lengths of all member intervals.
    pub fn total_length(&self) -> f64 {
        self.intervals.iter().map(Interval::length).sum()
    }

    pub fn clear(&mut self) {
        self.intervals.clear();
    }

    /// Insert `[lb, ub]`, merging with any interval it overlaps or nearly
    /// touches. Inverted input is ignored.
    pub fn almost_add(&mut self, lb: f64, ub: f64) {
        if lb > ub {
            return;
        }
        let mut new_lb = lb;
        let mut new_ub = ub;
        let mut merged = Vec::with_capacity(self.intervals.len() + 1);
        let mut placed = false;
        for iv in &self.intervals {
            if touches(iv.ub, new_lb) && touches(new_ub, iv.lb) {
                // Overlaps (or nearly touches) the incoming interval
                new_lb = new_lb.min(iv.lb);
                new_ub = new_ub.max(iv.ub);
            } else if iv.ub < new_lb {
                merged.push(*iv);
            } else {
                if !placed {
                    merged.push(Interval::new(new_lb, new_ub));
                    placed = true;
                }
                merged.push(*iv);
            }
        }
        if !placed {
            merged.push(Interval::new(new_lb, new_ub));
        }
        self.intervals = merged;
    }
}

/// `a` reaches up to `b`: overlap, or endpoints within the 5-digit precision.
fn touches(a: f64, b: f64) -> bool {
    a >= b || almost_equals(a, b)
}
