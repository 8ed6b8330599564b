//! Two-stage tracklet tracker driver.

use tracing::debug;

use crate::tracker::config::{ConfigError, TrackerConfig};
use crate::tracker::matching::Detection;
use crate::tracker::track::Tracker;
use crate::tracker::{formation, linking, track};

/// Tracklet-based tracker for high false alarm scenarios.
///
/// Runs two stages over a batch of detections: strict gated assignment forms
/// short high-confidence tracklets, then a greedy smoothness-aware matching
/// links them across temporal gaps. Holds no cross-run state, so repeated
/// runs over identical input produce identical output.
pub struct TrackletTracker {
    config: TrackerConfig,
}

impl TrackletTracker {
    /// Create a tracker, validating the configuration up front.
    pub fn new(config: TrackerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Run the full pipeline over a batch of detections.
    ///
    /// Formation completes before linking begins; an empty batch yields an
    /// empty [`Tracker`].
    pub fn run(&self, detections: &[Detection]) -> Tracker {
        let by_frame = formation::group_by_frame(detections);
        debug!(
            "tracking {} detections across {} frames",
            detections.len(),
            by_frame.len()
        );

        let tracklets = formation::form_tracklets(&by_frame, &self.config);
        let chains = linking::link_tracklets(&tracklets, &self.config);
        let tracks = track::assemble_tracks(&chains, &tracklets, &self.config);

        Tracker::new(self.config.tracker_name.clone(), tracks)
    }
}
