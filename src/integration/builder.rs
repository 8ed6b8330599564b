//! Builder for assembling detection arrays point by point.

use super::feed::DetectionArrays;

/// Builder for [`DetectionArrays`] from individual detections.
#[derive(Debug, Clone, Default)]
pub struct DetectionArraysBuilder {
    frames: Vec<i64>,
    rows: Vec<f32>,
    columns: Vec<f32>,
}

impl DetectionArraysBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a detection at `(frame, row, column)`.
    pub fn push(mut self, frame: i64, row: f32, column: f32) -> Self {
        self.frames.push(frame);
        self.rows.push(row);
        self.columns.push(column);
        self
    }

    /// Build the final [`DetectionArrays`].
    pub fn build(self) -> DetectionArrays {
        // Lengths are equal by construction.
        DetectionArrays::from_parts(self.frames, self.rows, self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_points() {
        let arrays = DetectionArraysBuilder::new()
            .push(0, 1.5, 2.5)
            .push(1, 3.5, 4.5)
            .build();

        assert_eq!(arrays.len(), 2);
        assert_eq!(arrays.frames(), &[0, 1]);
        assert_eq!(arrays.rows(), &[1.5, 3.5]);
        assert_eq!(arrays.columns(), &[2.5, 4.5]);
    }
}
