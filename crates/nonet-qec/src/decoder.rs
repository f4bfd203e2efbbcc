//! Majority-vote decoding of outcome frequency tables.

use std::fmt;

use nonet_hal::Counts;
use serde::{Deserialize, Serialize};

use crate::error::{QecError, QecResult};

/// A decoded logical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalValue {
    /// Logical `|0>`.
    Zero,
    /// Logical `|1>`.
    One,
}

impl fmt::Display for LogicalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogicalValue::Zero => "0",
            LogicalValue::One => "1",
        })
    }
}

/// Classify one physical bitstring.
///
/// A string is logical zero only if it has strictly more `0`s than `1`s;
/// a tie goes to [`LogicalValue::One`].
pub fn majority_vote(bitstring: &str) -> QecResult<LogicalValue> {
    let mut zeros = 0usize;
    let mut ones = 0usize;
    for c in bitstring.chars() {
        match c {
            '0' => zeros += 1,
            '1' => ones += 1,
            _ => return Err(QecError::InvalidBitstring(bitstring.to_string())),
        }
    }
    Ok(if zeros > ones {
        LogicalValue::Zero
    } else {
        LogicalValue::One
    })
}

/// Logical-state probabilities estimated from a frequency table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogicalDistribution {
    /// Probability of logical zero.
    pub p_zero: f64,
    /// Probability of logical one.
    pub p_one: f64,
    /// Shots classified as logical zero.
    pub zero_count: u64,
    /// Shots classified as logical one.
    pub one_count: u64,
    /// Total shots in the table.
    pub total: u64,
}

impl LogicalDistribution {
    /// `p_zero + p_one`.
    pub fn sum(&self) -> f64 {
        self.p_zero + self.p_one
    }

    /// The more probable logical value, ties going to one.
    pub fn most_likely(&self) -> LogicalValue {
        if self.zero_count > self.one_count {
            LogicalValue::Zero
        } else {
            LogicalValue::One
        }
    }

    /// Probability of `value`.
    pub fn probability(&self, value: LogicalValue) -> f64 {
        match value {
            LogicalValue::Zero => self.p_zero,
            LogicalValue::One => self.p_one,
        }
    }
}

impl fmt::Display for LogicalDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P(0) = {:.6} ({}/{}), P(1) = {:.6} ({}/{})",
            self.p_zero, self.zero_count, self.total, self.p_one, self.one_count, self.total
        )
    }
}

/// Decode a frequency table into logical probabilities.
///
/// Every key is classified with [`majority_vote`] and its count added to the
/// matching bucket. Keys need not share a length. Fails with
/// [`QecError::CountOverflow`] if the counts do not sum within a `u64`.
pub fn decode(counts: &Counts) -> QecResult<LogicalDistribution> {
    let mut zero_count = 0u64;
    let mut one_count = 0u64;
    for (bitstring, count) in counts.iter() {
        let bucket = match majority_vote(bitstring)? {
            LogicalValue::Zero => &mut zero_count,
            LogicalValue::One => &mut one_count,
        };
        *bucket = bucket.checked_add(count).ok_or(QecError::CountOverflow)?;
    }

    let total = zero_count
        .checked_add(one_count)
        .ok_or(QecError::CountOverflow)?;
    if total == 0 {
        return Err(QecError::EmptyOutcomeTable);
    }

    Ok(LogicalDistribution {
        p_zero: zero_count as f64 / total as f64,
        p_one: one_count as f64 / total as f64,
        zero_count,
        one_count,
        total,
    })
}
