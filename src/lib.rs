//! Two-stage tracklet-based multi-target tracker.
//!
//! Converts per-frame point detections (possibly dominated by false alarms)
//! into multi-frame target tracks:
//!
//! 1. **Formation**: short, high-confidence tracklets are formed frame by
//!    frame via gated minimum-cost assignment (Jonker–Volgenant).
//! 2. **Linking**: finished tracklets are chained across temporal gaps by a
//!    greedy minimum-cost matching over a smoothness-aware cost.
//!
//! Chains are concatenated into [`Track`]s and returned in a [`Tracker`].
//!
//! ```
//! use tracklink_rs::{Detection, TrackerConfig, TrackletTracker};
//!
//! let tracker = TrackletTracker::new(TrackerConfig::default()).unwrap();
//! let detections: Vec<Detection> = (0..10)
//!     .map(|f| Detection::new(f, f as f32, f as f32))
//!     .collect();
//! let output = tracker.run(&detections);
//! assert_eq!(output.tracks.len(), 1);
//! ```

pub mod integration;
pub mod tracker;

pub use integration::{DetectionArrays, DetectionFeed, TrackingPipeline};
pub use tracker::{ConfigError, Detection, Track, Tracker, TrackerConfig, Tracklet, TrackletTracker};
