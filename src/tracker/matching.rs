//! Matching utilities for tracklet-detection association.

use nalgebra::Vector2;
use ndarray::Array2;

/// A single point detection supplied by a detector.
///
/// Positions use the convention `x = column`, `y = row`.
#[derive(Debug, Clone, Copy)]
pub struct Detection {
    /// Frame index the detection was observed on
    pub frame: i64,
    /// Detection position in pixel coordinates
    pub position: Vector2<f32>,
}

impl Detection {
    pub fn new(frame: i64, row: f32, column: f32) -> Self {
        Self {
            frame,
            position: Vector2::new(column, row),
        }
    }

    pub fn row(&self) -> f32 {
        self.position.y
    }

    pub fn column(&self) -> f32 {
        self.position.x
    }
}

#[derive(Debug, Clone)]
pub struct AssignmentResult {
    pub matches: Vec<(usize, usize)>,
    pub unmatched_tracklets: Vec<usize>,
    pub unmatched_detections: Vec<usize>,
}

/// Solve a rectangular minimum-cost assignment over `cost_matrix`.
///
/// Matches are accepted only when their cost is strictly below `thresh`;
/// sentinel-cost pairings returned by the solver are rejected afterwards.
pub fn linear_assignment(cost_matrix: &Array2<f32>, thresh: f32) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();

    if num_rows == 0 {
        return AssignmentResult {
            matches: vec![],
            unmatched_tracklets: vec![],
            unmatched_detections: (0..num_cols).collect(),
        };
    }

    if num_cols == 0 {
        return AssignmentResult {
            matches: vec![],
            unmatched_tracklets: (0..num_rows).collect(),
            unmatched_detections: vec![],
        };
    }

    let size = num_rows.max(num_cols);
    let mut padded = Array2::<f64>::from_elem((size, size), 1e6);

    for i in 0..num_rows {
        for j in 0..num_cols {
            padded[[i, j]] = cost_matrix[[i, j]] as f64;
        }
    }

    let result = lapjv::lapjv(&padded);
    let mut matches = vec![];
    let mut unmatched_tracklets = vec![];
    let mut unmatched_detections_mask: Vec<bool> = vec![true; num_cols];

    match result {
        Ok((row_to_col, _)) => {
            for (row_idx, &col_idx) in row_to_col.iter().enumerate() {
                if row_idx >= num_rows {
                    continue;
                }
                if col_idx >= num_cols {
                    unmatched_tracklets.push(row_idx);
                } else if cost_matrix[[row_idx, col_idx]] < thresh {
                    matches.push((row_idx, col_idx));
                    unmatched_detections_mask[col_idx] = false;
                } else {
                    unmatched_tracklets.push(row_idx);
                }
            }
        }
        Err(_) => {
            unmatched_tracklets = (0..num_rows).collect();
        }
    }

    let unmatched_detections: Vec<usize> = unmatched_detections_mask
        .iter()
        .enumerate()
        .filter_map(|(i, &u)| if u { Some(i) } else { None })
        .collect();

    AssignmentResult {
        matches,
        unmatched_tracklets,
        unmatched_detections,
    }
}
