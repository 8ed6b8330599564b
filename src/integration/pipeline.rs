//! TrackingPipeline for combining detection feeds with the tracker.

use crate::tracker::{ConfigError, Detection, Tracker, TrackerConfig, TrackletTracker};

use super::DetectionFeed;

/// A combined pipeline that pools one or more detection feeds and runs the
/// two-stage tracklet tracker over the result.
pub struct TrackingPipeline<F: DetectionFeed> {
    feeds: Vec<F>,
    tracker: TrackletTracker,
}

impl<F: DetectionFeed> TrackingPipeline<F> {
    /// Create a new tracking pipeline with the given feeds and tracker config.
    pub fn new(feeds: Vec<F>, config: TrackerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            feeds,
            tracker: TrackletTracker::new(config)?,
        })
    }

    /// Create a new tracking pipeline with default tracker configuration.
    pub fn with_default_config(feeds: Vec<F>) -> Result<Self, ConfigError> {
        Self::new(feeds, TrackerConfig::default())
    }

    /// Fetch every feed, pool the detections, and run the tracker.
    ///
    /// Detections from all feeds share one association pool, so a target
    /// seen by several detectors still produces a single track.
    pub fn run(&mut self) -> Result<Tracker, F::Error> {
        let mut detections: Vec<Detection> = Vec::new();
        for feed in &mut self.feeds {
            detections.extend(feed.fetch()?.to_detections());
        }
        Ok(self.tracker.run(&detections))
    }

    /// Get a reference to the underlying feeds.
    pub fn feeds(&self) -> &[F] {
        &self.feeds
    }

    /// Get a mutable reference to the underlying feeds.
    pub fn feeds_mut(&mut self) -> &mut [F] {
        &mut self.feeds
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &TrackletTracker {
        &self.tracker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::DetectionArrays;

    struct MockFeed {
        arrays: DetectionArrays,
    }

    impl DetectionFeed for MockFeed {
        type Error = std::convert::Infallible;

        fn fetch(&mut self) -> Result<DetectionArrays, Self::Error> {
            Ok(self.arrays.clone())
        }
    }

    #[test]
    fn test_pipeline_pools_feeds() {
        // One mover split across two detectors: even frames from one,
        // odd frames from the other.
        let even: Vec<i64> = (0..12).filter(|f| f % 2 == 0).collect();
        let odd: Vec<i64> = (0..12).filter(|f| f % 2 == 1).collect();

        let feed_a = MockFeed {
            arrays: DetectionArrays::new(
                even.clone(),
                even.iter().map(|&f| 10.0 + f as f32).collect(),
                even.iter().map(|&f| f as f32).collect(),
            )
            .unwrap(),
        };
        let feed_b = MockFeed {
            arrays: DetectionArrays::new(
                odd.clone(),
                odd.iter().map(|&f| 10.0 + f as f32).collect(),
                odd.iter().map(|&f| f as f32).collect(),
            )
            .unwrap(),
        };

        let mut pipeline =
            TrackingPipeline::with_default_config(vec![feed_a, feed_b]).unwrap();
        let tracker = pipeline.run().unwrap();

        assert_eq!(tracker.tracks.len(), 1);
        assert_eq!(tracker.tracks[0].len(), 12);
    }

    #[test]
    fn test_pipeline_rejects_bad_config() {
        let config = TrackerConfig {
            max_linking_gap: -5,
            ..TrackerConfig::default()
        };
        assert!(TrackingPipeline::<MockFeed>::new(vec![], config).is_err());
    }
}
