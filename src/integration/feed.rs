//! Trait and array container for detection feeds.

use std::convert::Infallible;

use thiserror::Error;

use crate::tracker::Detection;

/// Error raised when parallel detection arrays disagree in length.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    #[error(
        "parallel detection arrays differ in length: {frames} frames, {rows} rows, {columns} columns"
    )]
    LengthMismatch {
        frames: usize,
        rows: usize,
        columns: usize,
    },
}

/// Trait for detection feeds.
///
/// Implement this trait to connect any detector output to the tracker.
///
/// # Example
///
/// ```ignore
/// use tracklink_rs::{DetectionArrays, DetectionFeed};
///
/// struct CsvFeed {
///     // Your loader here
/// }
///
/// impl DetectionFeed for CsvFeed {
///     type Error = std::io::Error;
///
///     fn fetch(&mut self) -> Result<DetectionArrays, Self::Error> {
///         // Load and return parallel frame/row/column arrays
///         Ok(DetectionArrays::default())
///     }
/// }
/// ```
pub trait DetectionFeed {
    /// Error type for feed failures.
    type Error;

    /// Produce this detector's detections as parallel arrays.
    fn fetch(&mut self) -> Result<DetectionArrays, Self::Error>;
}

/// Parallel `frames`/`rows`/`columns` arrays from a single detector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionArrays {
    frames: Vec<i64>,
    rows: Vec<f32>,
    columns: Vec<f32>,
}

impl DetectionArrays {
    /// Create from parallel arrays, rejecting mismatched lengths.
    pub fn new(frames: Vec<i64>, rows: Vec<f32>, columns: Vec<f32>) -> Result<Self, FeedError> {
        if frames.len() != rows.len() || frames.len() != columns.len() {
            return Err(FeedError::LengthMismatch {
                frames: frames.len(),
                rows: rows.len(),
                columns: columns.len(),
            });
        }
        Ok(Self {
            frames,
            rows,
            columns,
        })
    }

    /// Construct without validation; lengths must already agree.
    pub(super) fn from_parts(frames: Vec<i64>, rows: Vec<f32>, columns: Vec<f32>) -> Self {
        Self {
            frames,
            rows,
            columns,
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[i64] {
        &self.frames
    }

    pub fn rows(&self) -> &[f32] {
        &self.rows
    }

    pub fn columns(&self) -> &[f32] {
        &self.columns
    }

    /// Convert to per-point [`Detection`] records.
    pub fn to_detections(&self) -> Vec<Detection> {
        self.frames
            .iter()
            .zip(&self.rows)
            .zip(&self.columns)
            .map(|((&frame, &row), &column)| Detection::new(frame, row, column))
            .collect()
    }
}

impl DetectionFeed for DetectionArrays {
    type Error = Infallible;

    fn fetch(&mut self) -> Result<DetectionArrays, Self::Error> {
        Ok(self.clone())
    }
}
