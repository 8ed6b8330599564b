//! Final track containers assembled from linked tracklet chains.

use tracing::{debug, trace};

use crate::tracker::config::TrackerConfig;
use crate::tracker::tracklet::Tracklet;

/// A finished track: ordered frames with parallel row/column coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Display name, numbered in emission order
    pub name: String,
    /// Ordered frame indices
    pub frames: Vec<i64>,
    /// Row coordinate per frame
    pub rows: Vec<f32>,
    /// Column coordinate per frame
    pub columns: Vec<f32>,
}

impl Track {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Named collection of tracks, the unit handed to external consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct Tracker {
    pub name: String,
    pub tracks: Vec<Track>,
}

impl Tracker {
    pub fn new(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        Self {
            name: name.into(),
            tracks,
        }
    }
}

/// Concatenate each chain's tracklets into a [`Track`], dropping chains
/// below `min_track_length`.
pub(super) fn assemble_tracks(
    chains: &[Vec<usize>],
    tracklets: &[Tracklet],
    config: &TrackerConfig,
) -> Vec<Track> {
    let mut tracks = Vec::new();

    for chain in chains {
        let mut points: Vec<(i64, f32, f32)> = Vec::new();
        for &idx in chain {
            let tracklet = &tracklets[idx];
            for (frame, position) in tracklet.frames().iter().zip(tracklet.positions()) {
                points.push((*frame, position.y, position.x));
            }
        }

        if points.len() < config.min_track_length {
            trace!("dropping chain of {} points below minimum", points.len());
            continue;
        }

        // Construction already orders the chain; the sort guards against
        // out-of-order input. Stable, keyed on frame only.
        points.sort_by_key(|&(frame, _, _)| frame);

        let name = format!("Track {}", tracks.len() + 1);
        let frames = points.iter().map(|&(frame, _, _)| frame).collect();
        let rows = points.iter().map(|&(_, row, _)| row).collect();
        let columns = points.iter().map(|&(_, _, column)| column).collect();

        tracks.push(Track {
            name,
            frames,
            rows,
            columns,
        });
    }

    debug!("assembled {} tracks from {} chains", tracks.len(), chains.len());

    tracks
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    fn make_tracklet(id: u64, start_frame: i64, start_x: f32, y: f32, len: usize) -> Tracklet {
        let mut tracklet = Tracklet::new(Vector2::new(start_x, y), start_frame, id);
        for k in 1..len as i64 {
            tracklet.add_detection(Vector2::new(start_x + k as f32, y), start_frame + k);
        }
        tracklet
    }

    #[test]
    fn test_concatenates_chain_in_frame_order() {
        let tracklets = vec![
            make_tracklet(1, 0, 0.0, 5.0, 3),
            make_tracklet(2, 5, 5.0, 5.0, 3),
        ];
        let chains = vec![vec![0, 1]];

        let tracks = assemble_tracks(&chains, &tracklets, &TrackerConfig::default());
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].name, "Track 1");
        assert_eq!(tracks[0].frames, vec![0, 1, 2, 5, 6, 7]);
        assert_eq!(tracks[0].columns, vec![0.0, 1.0, 2.0, 5.0, 6.0, 7.0]);
        assert_eq!(tracks[0].rows, vec![5.0; 6]);
    }

    #[test]
    fn test_short_chain_dropped() {
        let tracklets = vec![make_tracklet(1, 0, 0.0, 5.0, 4)];
        let chains = vec![vec![0]];

        let tracks = assemble_tracks(&chains, &tracklets, &TrackerConfig::default());
        assert!(tracks.is_empty());
    }

    #[test]
    fn test_out_of_order_chain_resorted() {
        // A chain handed over in reverse temporal order still produces a
        // frame-sorted track.
        let tracklets = vec![
            make_tracklet(1, 5, 5.0, 1.0, 3),
            make_tracklet(2, 0, 0.0, 1.0, 3),
        ];
        let chains = vec![vec![0, 1]];

        let tracks = assemble_tracks(&chains, &tracklets, &TrackerConfig::default());
        assert_eq!(tracks[0].frames, vec![0, 1, 2, 5, 6, 7]);
    }

    #[test]
    fn test_tracks_numbered_in_emission_order() {
        let tracklets = vec![
            make_tracklet(1, 0, 0.0, 1.0, 5),
            make_tracklet(2, 0, 0.0, 100.0, 5),
        ];
        let chains = vec![vec![0], vec![1]];

        let tracks = assemble_tracks(&chains, &tracklets, &TrackerConfig::default());
        let names: Vec<&str> = tracks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Track 1", "Track 2"]);
    }
}
