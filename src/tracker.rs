mod config;
mod formation;
mod linking;
mod matching;
mod track;
mod tracklet;
mod tracklet_tracker;

pub use config::{ConfigError, TrackerConfig};
pub use matching::Detection;
pub use track::{Track, Tracker};
pub use tracklet::Tracklet;
pub use tracklet_tracker::TrackletTracker;
