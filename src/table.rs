use crate::{
    error::TableError,
    interpolate::{compensate, locate_segment, Segment},
};

/// A validated pairing of raw breakpoints and normalized values.
///
/// The breakpoints are strictly ascending. The normalized values may
/// ascend or descend. Both slices are borrowed, so the tables must
/// outlive anything built from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationTable<'a> {
    breakpoints: &'a [i32],
    normalized: &'a [i32],
}

impl<'a> CalibrationTable<'a> {
    /// Returns a table pairing `breakpoints[i]` with `normalized[i]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use adc_normalizer::{CalibrationTable, TableError};
    ///
    /// let aperture = [150, 124, 114, 106];
    ///
    /// assert!(CalibrationTable::new(&[5, 9, 16, 24], &aperture).is_ok());
    /// assert_eq!(
    ///     CalibrationTable::new(&[5, 9, 9, 24], &aperture),
    ///     Err(TableError::SegmentsNotAscending)
    /// );
    /// ```
    pub fn new(breakpoints: &'a [i32], normalized: &'a [i32]) -> Result<Self, TableError> {
        if breakpoints.len() < 2 {
            return Err(TableError::NotEnoughData);
        }

        if breakpoints.len() != normalized.len() {
            return Err(TableError::LengthMismatch);
        }

        if !breakpoints.windows(2).all(|w| w[0] < w[1]) {
            return Err(TableError::SegmentsNotAscending);
        }

        Ok(Self {
            breakpoints,
            normalized,
        })
    }

    /// Number of points in the table.
    pub fn vector_size(&self) -> usize {
        self.breakpoints.len()
    }

    pub fn breakpoints(&self) -> &'a [i32] {
        self.breakpoints
    }

    pub fn normalized(&self) -> &'a [i32] {
        self.normalized
    }

    /// See [`locate_segment`].
    pub fn locate(&self, raw_value: i32) -> isize {
        locate_segment(raw_value, self.breakpoints)
    }

    /// See [`compensate`].
    pub fn compensate(&self, raw_value: i32) -> (i32, Segment) {
        compensate(raw_value, self.breakpoints, self.normalized)
    }

    /// Returns the smallest value that can be returned by
    /// [`compensate`](CalibrationTable::compensate).
    pub fn min_value(&self) -> i32 {
        self.first_value().min(self.last_value())
    }

    /// Returns the largest value that can be returned by
    /// [`compensate`](CalibrationTable::compensate).
    pub fn max_value(&self) -> i32 {
        self.first_value().max(self.last_value())
    }

    fn first_value(&self) -> i32 {
        self.normalized[0]
    }

    fn last_value(&self) -> i32 {
        self.normalized[self.normalized.len() - 1]
    }
}
