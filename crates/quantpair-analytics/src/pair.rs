//! Alignment of two price series.

use quantpair_aggregate::Bar;
use std::cmp::Ordering;

/// Two equally long price series, index-aligned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairSeries {
    a: Vec<f64>,
    b: Vec<f64>,
}

impl PairSeries {
    /// Keeps the most recent `min(len(a), len(b))` observations of each.
    ///
    /// The oldest excess observations of the longer series are dropped. This
    /// is positional, not a timestamp join; callers must ensure comparable
    /// sampling rates.
    #[must_use]
    pub fn align(a: &[f64], b: &[f64]) -> Self {
        let n = a.len().min(b.len());
        Self {
            a: a[a.len() - n..].to_vec(),
            b: b[b.len() - n..].to_vec(),
        }
    }

    /// Inner-joins two bar series on bucket timestamp, pairing their closes.
    ///
    /// Both inputs must be ascending by timestamp. Buckets where either
    /// close is not finite are skipped.
    #[must_use]
    pub fn join_on_timestamp(a: &[Bar], b: &[Bar]) -> Self {
        let mut joined = Self::default();
        let (mut i, mut j) = (0, 0);

        while i < a.len() && j < b.len() {
            match a[i].timestamp.cmp(&b[j].timestamp) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    if a[i].close.is_finite() && b[j].close.is_finite() {
                        joined.a.push(a[i].close);
                        joined.b.push(b[j].close);
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
        joined
    }

    /// Returns the first series.
    #[must_use]
    pub fn a(&self) -> &[f64] {
        &self.a
    }

    /// Returns the second series.
    #[must_use]
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// Returns the common length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.a.len()
    }

    /// Returns true if there are no paired observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }
}
