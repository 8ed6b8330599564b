//! Integration module for connecting detection feeds with the tracker.
//!
//! This module provides traits and utilities for wiring detector outputs
//! (parallel frame/row/column arrays) into the tracklet tracker.

mod builder;
mod feed;
mod pipeline;

pub use builder::DetectionArraysBuilder;
pub use feed::{DetectionArrays, DetectionFeed, FeedError};
pub use pipeline::TrackingPipeline;
