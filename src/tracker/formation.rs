//! Stage 1: form high-confidence tracklets via gated minimum-cost assignment.

use std::collections::BTreeMap;

use nalgebra::Vector2;
use ndarray::Array2;
use tracing::debug;

use crate::tracker::config::TrackerConfig;
use crate::tracker::matching::{self, AssignmentResult, Detection};
use crate::tracker::tracklet::Tracklet;

/// A tracklet more than this many frames stale is never considered for new
/// associations during formation.
const MAX_FORMATION_GAP: i64 = 3;

/// Group detections by frame, visited in ascending frame order.
pub(super) fn group_by_frame(detections: &[Detection]) -> BTreeMap<i64, Vec<Vector2<f32>>> {
    let mut by_frame: BTreeMap<i64, Vec<Vector2<f32>>> = BTreeMap::new();
    for det in detections {
        by_frame.entry(det.frame).or_default().push(det.position);
    }
    by_frame
}

/// Index-addressed arena of tracklet records with stable identifiers.
///
/// The active and finalized sets are index collections over this arena, so
/// no tracklet is ever aliased by two owners.
#[derive(Debug, Default)]
struct TrackletArena {
    records: Vec<Tracklet>,
}

impl TrackletArena {
    fn spawn(&mut self, position: Vector2<f32>, frame: i64) -> usize {
        let idx = self.records.len();
        self.records.push(Tracklet::new(position, frame, idx as u64 + 1));
        idx
    }

    fn get(&self, idx: usize) -> &Tracklet {
        &self.records[idx]
    }

    fn get_mut(&mut self, idx: usize) -> &mut Tracklet {
        &mut self.records[idx]
    }

    /// Move the records at `order` out of the arena, preserving order.
    fn into_tracklets(self, order: &[usize]) -> Vec<Tracklet> {
        let mut slots: Vec<Option<Tracklet>> = self.records.into_iter().map(Some).collect();
        order.iter().filter_map(|&idx| slots[idx].take()).collect()
    }
}

/// Run tracklet formation over frame-grouped detections.
///
/// Returns the finalized tracklets meeting `min_tracklet_length`, in
/// finalization order.
pub(super) fn form_tracklets(
    detections_by_frame: &BTreeMap<i64, Vec<Vector2<f32>>>,
    config: &TrackerConfig,
) -> Vec<Tracklet> {
    let mut arena = TrackletArena::default();
    let mut active: Vec<usize> = Vec::new();
    let mut finalized: Vec<usize> = Vec::new();

    for (&frame, detections) in detections_by_frame {
        if active.is_empty() {
            for &position in detections {
                active.push(arena.spawn(position, frame));
            }
            continue;
        }

        // Sentinel entries mark ineligible pairs; the assignment threshold
        // rejects them even if the solver returns them.
        let sentinel = 2.0 * config.initial_search_radius;
        let mut cost = Array2::from_elem((active.len(), detections.len()), sentinel);

        for (i, &tracklet_idx) in active.iter().enumerate() {
            let tracklet = arena.get(tracklet_idx);
            if frame - tracklet.last_frame() > MAX_FORMATION_GAP {
                continue;
            }
            for (j, &position) in detections.iter().enumerate() {
                let dist = tracklet.distance_to(position, frame);
                if dist >= config.initial_search_radius {
                    continue;
                }
                if !tracklet.check_velocity_consistency(position, frame, config.max_velocity_change)
                {
                    continue;
                }
                cost[[i, j]] = dist;
            }
        }

        let AssignmentResult {
            matches,
            unmatched_detections,
            ..
        } = matching::linear_assignment(&cost, config.initial_search_radius);

        let mut matched_rows = vec![false; active.len()];
        for &(row, col) in &matches {
            matched_rows[row] = true;
            arena.get_mut(active[row]).add_detection(detections[col], frame);
        }

        // Unmatched tracklets end here: keep the long ones, drop the rest.
        let mut still_active = Vec::with_capacity(active.len());
        for (row, &tracklet_idx) in active.iter().enumerate() {
            if matched_rows[row] {
                still_active.push(tracklet_idx);
            } else if arena.get(tracklet_idx).len() >= config.min_tracklet_length {
                finalized.push(tracklet_idx);
            }
        }
        active = still_active;

        for &col in &unmatched_detections {
            active.push(arena.spawn(detections[col], frame));
        }
    }

    for tracklet_idx in active {
        if arena.get(tracklet_idx).len() >= config.min_tracklet_length {
            finalized.push(tracklet_idx);
        }
    }

    debug!(
        "formed {} tracklets from {} detection frames",
        finalized.len(),
        detections_by_frame.len()
    );

    arena.into_tracklets(&finalized)
}
