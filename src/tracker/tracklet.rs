//! High-confidence track segment with a sliding-window velocity estimate.

use nalgebra::Vector2;

/// Number of most recent points used for the velocity estimate.
const VELOCITY_WINDOW: usize = 3;

/// A short track segment built from per-frame point detections.
///
/// Positions use the convention `x = column`, `y = row`. Frames are strictly
/// increasing; the velocity estimate is undefined until two points exist and
/// is recomputed on every append.
#[derive(Debug, Clone)]
pub struct Tracklet {
    /// Stable identifier assigned at creation
    id: u64,
    /// Ordered point positions, parallel to `frames`
    positions: Vec<Vector2<f32>>,
    /// Ordered frame indices, strictly increasing
    frames: Vec<i64>,
    /// Velocity in pixels per frame, `None` until two points exist
    velocity: Option<Vector2<f32>>,
}

impl Tracklet {
    /// Create a single-point tracklet from its seed detection.
    pub fn new(position: Vector2<f32>, frame: i64, id: u64) -> Self {
        Self {
            id,
            positions: vec![position],
            frames: vec![frame],
            velocity: None,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[i64] {
        &self.frames
    }

    pub fn positions(&self) -> &[Vector2<f32>] {
        &self.positions
    }

    pub fn first_frame(&self) -> i64 {
        self.frames[0]
    }

    pub fn last_frame(&self) -> i64 {
        self.frames[self.frames.len() - 1]
    }

    pub fn first_position(&self) -> Vector2<f32> {
        self.positions[0]
    }

    pub fn last_position(&self) -> Vector2<f32> {
        self.positions[self.positions.len() - 1]
    }

    /// Current velocity estimate, `None` with fewer than two points.
    pub fn velocity(&self) -> Option<Vector2<f32>> {
        self.velocity
    }

    /// Velocity at the tracklet start, zero when undefined.
    pub fn start_velocity(&self) -> Vector2<f32> {
        self.velocity.unwrap_or_else(Vector2::zeros)
    }

    /// Velocity at the tracklet end, zero when undefined.
    pub fn end_velocity(&self) -> Vector2<f32> {
        self.velocity.unwrap_or_else(Vector2::zeros)
    }

    /// Append a detection and recompute the velocity estimate from the most
    /// recent window of points.
    pub fn add_detection(&mut self, position: Vector2<f32>, frame: i64) {
        self.positions.push(position);
        self.frames.push(frame);

        // At least two points exist once an append lands.
        let n = VELOCITY_WINDOW.min(self.positions.len());
        let first = self.positions.len() - n;
        let dt = self.frames[self.frames.len() - 1] - self.frames[first];
        self.velocity = if dt > 0 {
            let displacement = self.positions[self.positions.len() - 1] - self.positions[first];
            Some(displacement / dt as f32)
        } else {
            Some(Vector2::zeros())
        };
    }

    /// Predict the position at `target_frame` by linear extrapolation from
    /// the last point. `None` while the velocity is undefined.
    pub fn predict_position(&self, target_frame: i64) -> Option<Vector2<f32>> {
        let velocity = self.velocity?;
        let dt = (target_frame - self.last_frame()) as f32;
        Some(self.last_position() + velocity * dt)
    }

    /// Check whether extending to `position` at `frame` keeps the velocity
    /// within `max_change` of the current estimate.
    ///
    /// Vacuously true with fewer than two points; always false when `frame`
    /// equals the last frame (zero elapsed time).
    pub fn check_velocity_consistency(
        &self,
        position: Vector2<f32>,
        frame: i64,
        max_change: f32,
    ) -> bool {
        let Some(velocity) = self.velocity else {
            return true;
        };

        let dt = frame - self.last_frame();
        if dt == 0 {
            return false;
        }

        let candidate = (position - self.last_position()) / dt as f32;
        (candidate - velocity).norm() < max_change
    }

    /// Euclidean distance from the predicted position at `frame`, falling
    /// back to the last known position while the velocity is undefined.
    pub fn distance_to(&self, position: Vector2<f32>, frame: i64) -> f32 {
        match self.predict_position(frame) {
            Some(predicted) => (position - predicted).norm(),
            None => (position - self.last_position()).norm(),
        }
    }

    /// Extrapolate `frames_ahead` past the last point. `None` while the
    /// velocity is undefined.
    pub fn extrapolate_forward(&self, frames_ahead: i64) -> Option<Vector2<f32>> {
        let velocity = self.velocity?;
        Some(self.last_position() + velocity * frames_ahead as f32)
    }

    /// Extrapolate `frames_back` before the first point. `None` while the
    /// velocity is undefined.
    pub fn extrapolate_backward(&self, frames_back: i64) -> Option<Vector2<f32>> {
        let velocity = self.velocity?;
        Some(self.first_position() - velocity * frames_back as f32)
    }
}
