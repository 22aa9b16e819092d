//! Validation and bound filtering for an index-aligned time series.
//!
//! [`AlignedSeries`] pairs timestamps with the rows (axis 0) of an
//! observation array. Once built, `timestamps.len() == data.len_of(Axis(0))`
//! holds and the timestamps are weakly ascending, so bound filtering always
//! keeps one contiguous run of rows.

use std::ops::Range;

use ndarray::{Array, Axis, Dimension, Slice};
use seqwin_core::InvalidInputError;

/// Index of the first pair with `timestamps[i] <= timestamps[i + 1]` false.
///
/// Incomparable pairs (NaN) count as descending.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn first_descending_pair<T: PartialOrd>(timestamps: &[T]) -> Option<usize> {
    timestamps.windows(2).position(|w| !(w[0] <= w[1]))
}

/// Whether `timestamps[i] <= timestamps[i + 1]` for every consecutive pair.
pub fn is_ascending<T: PartialOrd>(timestamps: &[T]) -> bool {
    first_descending_pair(timestamps).is_none()
}

/// Whether `data` has a row axis to align with a time series.
pub fn is_array_like<A, D: Dimension>(data: &Array<A, D>) -> bool {
    data.ndim() >= 1
}

/// Rows of an ascending series kept by inclusive `start`/`end` bounds.
///
/// Equivalent to masking with `t >= start` and then `t <= end`, including
/// for incomparable bounds, which keep nothing.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn bounded_range<T: PartialOrd>(
    timestamps: &[T],
    start: Option<&T>,
    end: Option<&T>,
) -> Range<usize> {
    let lo = start.map_or(0, |s| timestamps.partition_point(|t| !(t >= s)));
    let hi = end.map_or(timestamps.len(), |e| {
        lo + timestamps[lo..].partition_point(|t| t <= e)
    });
    lo..hi
}

/// Timestamps and observation rows, validated to be aligned and ascending.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignedSeries<T, A, D: Dimension> {
    timestamps: Vec<T>,
    data: Array<A, D>,
}

impl<T: PartialOrd, A, D: Dimension> AlignedSeries<T, A, D> {
    /// Validate and pair a time series with its observation array.
    ///
    /// # Errors
    ///
    /// Checked in order: [`InvalidInputError::NotAscending`],
    /// [`InvalidInputError::NotArrayLike`],
    /// [`InvalidInputError::LengthMismatch`].
    pub fn new(timestamps: Vec<T>, data: Array<A, D>) -> Result<Self, InvalidInputError> {
        if let Some(index) = first_descending_pair(&timestamps) {
            return Err(InvalidInputError::NotAscending { index });
        }
        if !is_array_like(&data) {
            return Err(InvalidInputError::NotArrayLike);
        }
        let rows = data.len_of(Axis(0));
        if timestamps.len() != rows {
            return Err(InvalidInputError::LengthMismatch {
                timestamps: timestamps.len(),
                rows,
            });
        }
        Ok(Self { timestamps, data })
    }

    /// Keep only rows with `start <= timestamp <= end` (either bound optional).
    ///
    /// Slices the array in place; row data is not copied.
    pub fn truncate(mut self, start: Option<&T>, end: Option<&T>) -> Self {
        let range = bounded_range(&self.timestamps, start, end);
        if range != (0..self.timestamps.len()) {
            self.timestamps.truncate(range.end);
            self.timestamps.drain(..range.start);
            self.data
                .slice_axis_inplace(Axis(0), Slice::from(range.start..range.end));
        }
        self
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether no rows are left.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// The timestamps.
    pub fn timestamps(&self) -> &[T] {
        &self.timestamps
    }

    /// The observation array.
    pub fn data(&self) -> &Array<A, D> {
        &self.data
    }

    /// Split into timestamps and observation array.
    pub fn into_parts(self) -> (Vec<T>, Array<A, D>) {
        (self.timestamps, self.data)
    }
}
