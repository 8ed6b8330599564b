//! Stage 2: link finished tracklets across temporal gaps.
//!
//! Linking is a deliberate greedy approximation rather than a globally
//! optimal matching: tracklet counts are small relative to raw detection
//! counts, and downstream track-count expectations depend on the greedy
//! behavior. Ties are broken by lowest (source, target) scan order.

use ndarray::Array2;
use tracing::debug;

use crate::tracker::config::TrackerConfig;
use crate::tracker::tracklet::Tracklet;

/// Build the directed linking cost over ordered tracklet pairs.
///
/// An entry (i, j) is finite only when tracklet `j` starts strictly after
/// tracklet `i` ends, within `max_linking_gap`, tracklet `i` has a defined
/// velocity to extrapolate with, and the extrapolation lands within
/// `linking_search_radius` of `j`'s first point.
fn link_cost_matrix(tracklets: &[Tracklet], config: &TrackerConfig) -> Array2<f32> {
    let n = tracklets.len();
    let mut cost = Array2::from_elem((n, n), f32::INFINITY);

    for (i, source) in tracklets.iter().enumerate() {
        for (j, target) in tracklets.iter().enumerate() {
            if i == j {
                continue;
            }
            if target.first_frame() <= source.last_frame() {
                continue;
            }

            let frame_gap = target.first_frame() - source.last_frame();
            if frame_gap > config.max_linking_gap {
                continue;
            }

            let Some(predicted) = source.extrapolate_forward(frame_gap) else {
                continue;
            };

            let position_error = (predicted - target.first_position()).norm();
            if position_error > config.linking_search_radius {
                continue;
            }

            let velocity_error = (source.end_velocity() - target.start_velocity()).norm();
            cost[[i, j]] = position_error + config.smoothness_weight * velocity_error;
        }
    }

    cost
}

/// Partition tracklet indices into ordered chains by greedy minimum-cost
/// link selection.
///
/// Each tracklet is consumed at most once as a link source and once as a
/// link target, so every index appears in exactly one chain; a chain of
/// length one means "unlinked".
pub(super) fn link_tracklets(tracklets: &[Tracklet], config: &TrackerConfig) -> Vec<Vec<usize>> {
    let n = tracklets.len();
    let cost = link_cost_matrix(tracklets, config);

    let mut successor: Vec<Option<usize>> = vec![None; n];
    let mut predecessor: Vec<Option<usize>> = vec![None; n];

    // Repeated full rescan for the global minimum; fine at tracklet counts.
    loop {
        let mut best: Option<(usize, usize, f32)> = None;
        for i in 0..n {
            if successor[i].is_some() {
                continue;
            }
            for j in 0..n {
                if predecessor[j].is_some() {
                    continue;
                }
                let c = cost[[i, j]];
                if c.is_finite() && best.is_none_or(|(_, _, best_cost)| c < best_cost) {
                    best = Some((i, j, c));
                }
            }
        }

        let Some((i, j, _)) = best else {
            break;
        };
        successor[i] = Some(j);
        predecessor[j] = Some(i);
    }

    // Frame ordering makes the link graph acyclic, so every chain starts at
    // a tracklet with no predecessor.
    let mut chains = Vec::new();
    for start in 0..n {
        if predecessor[start].is_some() {
            continue;
        }
        let mut chain = vec![start];
        let mut current = start;
        while let Some(next) = successor[current] {
            chain.push(next);
            current = next;
        }
        chains.push(chain);
    }

    debug!("linked {} tracklets into {} chains", n, chains.len());

    chains
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    fn make_tracklet(id: u64, start_frame: i64, start_x: f32, y: f32, len: usize) -> Tracklet {
        // Constant 1 px/frame motion along x.
        let mut tracklet = Tracklet::new(Vector2::new(start_x, y), start_frame, id);
        for k in 1..len as i64 {
            tracklet.add_detection(Vector2::new(start_x + k as f32, y), start_frame + k);
        }
        tracklet
    }

    fn config() -> TrackerConfig {
        TrackerConfig::default()
    }

    #[test]
    fn test_links_across_gap_with_zero_position_error() {
        // Ends at frame 10, position (100, 100), velocity (1, 0); the next
        // tracklet starts at frame 14, position (104, 100).
        let a = make_tracklet(1, 6, 96.0, 100.0, 5);
        let b = make_tracklet(2, 14, 104.0, 100.0, 3);

        let chains = link_tracklets(&[a, b], &config());
        assert_eq!(chains, vec![vec![0, 1]]);
    }

    #[test]
    fn test_gap_beyond_limit_stays_separate() {
        let a = make_tracklet(1, 6, 96.0, 100.0, 5);
        let b = make_tracklet(2, 1014, 1104.0, 100.0, 5);

        let chains = link_tracklets(&[a, b], &config());
        assert_eq!(chains, vec![vec![0], vec![1]]);
    }

    #[test]
    fn test_position_error_beyond_radius_stays_separate() {
        let a = make_tracklet(1, 0, 0.0, 0.0, 5);
        // Starts on time but 50 px off the extrapolation.
        let b = make_tracklet(2, 6, 6.0, 50.0, 5);

        let chains = link_tracklets(&[a, b], &config());
        assert_eq!(chains, vec![vec![0], vec![1]]);
    }

    #[test]
    fn test_chains_three_tracklets_in_order() {
        let a = make_tracklet(1, 0, 0.0, 10.0, 4);
        let b = make_tracklet(2, 6, 6.0, 10.0, 4);
        let c = make_tracklet(3, 12, 12.0, 10.0, 4);

        let chains = link_tracklets(&[a, b, c], &config());
        assert_eq!(chains, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_no_tracklet_appears_twice() {
        let tracklets: Vec<Tracklet> = (0..6)
            .map(|k| make_tracklet(k as u64 + 1, k * 6, k as f32 * 6.0, 20.0, 4))
            .collect();

        let chains = link_tracklets(&tracklets, &config());
        let mut seen: Vec<usize> = chains.iter().flatten().copied().collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_undefined_velocity_source_never_links() {
        let single = Tracklet::new(Vector2::new(0.0, 0.0), 0, 1);
        let b = make_tracklet(2, 2, 2.0, 0.0, 4);

        let chains = link_tracklets(&[single, b], &config());
        assert_eq!(chains, vec![vec![0], vec![1]]);
    }

    #[test]
    fn test_smoothness_weight_steers_competition() {
        // Two candidate continuations at equal position error; the one with
        // the matching velocity must win the single available link.
        let a = make_tracklet(1, 0, 0.0, 0.0, 4);

        // Same start point, opposite headings.
        let mut smooth = Tracklet::new(Vector2::new(5.0, 0.0), 5, 2);
        smooth.add_detection(Vector2::new(6.0, 0.0), 6);
        smooth.add_detection(Vector2::new(7.0, 0.0), 7);

        let mut rough = Tracklet::new(Vector2::new(5.0, 0.0), 5, 3);
        rough.add_detection(Vector2::new(4.0, 0.0), 6);
        rough.add_detection(Vector2::new(3.0, 0.0), 7);

        let chains = link_tracklets(&[a, smooth, rough], &config());
        assert!(chains.contains(&vec![0, 1]));
        assert!(chains.contains(&vec![2]));
    }
}
