//! Tracker configuration and fail-fast validation.

use thiserror::Error;

/// Error raised when a [`TrackerConfig`] value is rejected at construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A radius or weight that must be a positive finite number.
    #[error("`{field}` must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    /// A radius or weight that must be a non-negative finite number.
    #[error("`{field}` must be non-negative and finite, got {value}")]
    Negative { field: &'static str, value: f32 },
    /// A minimum length that must be at least one point.
    #[error("`{field}` must be at least 1")]
    ZeroLength { field: &'static str },
    /// The linking gap cannot be negative.
    #[error("`max_linking_gap` must be non-negative, got {0}")]
    NegativeLinkingGap(i64),
}

/// Configuration for the two-stage tracklet tracker.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Name given to the output track container
    pub tracker_name: String,
    /// Max distance between a prediction and a detection during formation
    pub initial_search_radius: f32,
    /// Max velocity change a formation association may introduce
    pub max_velocity_change: f32,
    /// Minimum points for a tracklet to survive finalization
    pub min_tracklet_length: usize,
    /// Maximum frame gap bridged by the linking stage
    pub max_linking_gap: i64,
    /// Max extrapolation error for a link candidate
    pub linking_search_radius: f32,
    /// Weight of the velocity discontinuity term in the linking cost
    pub smoothness_weight: f32,
    /// Minimum points for an assembled track to be emitted
    pub min_track_length: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tracker_name: "Tracklet Tracker".to_string(),
            initial_search_radius: 10.0,
            max_velocity_change: 5.0,
            min_tracklet_length: 3,
            max_linking_gap: 10,
            linking_search_radius: 30.0,
            smoothness_weight: 1.0,
            min_track_length: 5,
        }
    }
}

impl TrackerConfig {
    /// Validate the configuration, rejecting values that would produce
    /// silently wrong output.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.initial_search_radius.is_finite() && self.initial_search_radius > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "initial_search_radius",
                value: self.initial_search_radius,
            });
        }
        if !(self.max_velocity_change.is_finite() && self.max_velocity_change >= 0.0) {
            return Err(ConfigError::Negative {
                field: "max_velocity_change",
                value: self.max_velocity_change,
            });
        }
        if !(self.linking_search_radius.is_finite() && self.linking_search_radius >= 0.0) {
            return Err(ConfigError::Negative {
                field: "linking_search_radius",
                value: self.linking_search_radius,
            });
        }
        if !(self.smoothness_weight.is_finite() && self.smoothness_weight >= 0.0) {
            return Err(ConfigError::Negative {
                field: "smoothness_weight",
                value: self.smoothness_weight,
            });
        }
        if self.min_tracklet_length == 0 {
            return Err(ConfigError::ZeroLength {
                field: "min_tracklet_length",
            });
        }
        if self.min_track_length == 0 {
            return Err(ConfigError::ZeroLength {
                field: "min_track_length",
            });
        }
        if self.max_linking_gap < 0 {
            return Err(ConfigError::NegativeLinkingGap(self.max_linking_gap));
        }
        Ok(())
    }
}
