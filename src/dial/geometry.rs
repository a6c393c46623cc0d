//! Angle and coordinate math for the circular session dial

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::state::timer_state::{MAX_SESSION_MINUTES, MIN_SESSION_MINUTES};

/// Side length of the square view box the dial is drawn in
pub const VIEW_BOX_SIZE: f64 = 200.0;
/// Radius of the progress ring
pub const RING_RADIUS: f64 = 90.0;
/// Radius of the draggable handle
pub const HANDLE_RADIUS: f64 = 8.0;

/// A position in view-box units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Layout of the dial: ring centre, ring radius and handle size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialGeometry {
    pub center: Point,
    pub radius: f64,
    pub handle_radius: f64,
}

impl DialGeometry {
    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.radius
    }

    /// Where the handle sits for a given session length
    pub fn handle_position(&self, session_minutes: u32) -> Point {
        let angle = minutes_to_angle(session_minutes);
        let radians = (angle - 90.0) * (PI / 180.0);
        Point {
            x: self.center.x + self.radius * radians.cos(),
            y: self.center.y + self.radius * radians.sin(),
        }
    }

    /// Dash offset of the progress ring for a progress fraction in 0..=1
    pub fn stroke_offset(&self, progress: f64) -> f64 {
        self.circumference() * (1.0 - progress)
    }

    /// Whether a pointer press lands on the handle
    pub fn hits_handle(&self, pointer: Point, session_minutes: u32) -> bool {
        pointer.distance_to(self.handle_position(session_minutes)) <= self.handle_radius
    }

    /// Session length selected by a pointer at `pointer`
    pub fn minutes_at(&self, pointer: Point) -> u32 {
        angle_to_minutes(point_to_angle(pointer.x, pointer.y, self.center.x, self.center.y))
    }
}

impl Default for DialGeometry {
    fn default() -> Self {
        Self {
            center: Point::new(VIEW_BOX_SIZE / 2.0, VIEW_BOX_SIZE / 2.0),
            radius: RING_RADIUS,
            handle_radius: HANDLE_RADIUS,
        }
    }
}

/// Clockwise angle of `(px, py)` around the centre in degrees, 0 at 12 o'clock,
/// normalized to `[0, 360)`
pub fn point_to_angle(px: f64, py: f64, center_x: f64, center_y: f64) -> f64 {
    let raw = (py - center_y).atan2(px - center_x).to_degrees();
    let angle = (raw + 90.0).rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if angle >= 360.0 {
        0.0
    } else {
        angle
    }
}

/// Session length for a dial angle. The handle runs counter-clockwise from
/// 60 at 12 o'clock, so 0 degrees is a full revolution.
pub fn angle_to_minutes(angle: f64) -> u32 {
    let angle = angle.rem_euclid(360.0);
    let normalized = if angle == 0.0 { 360.0 } else { 360.0 - angle };
    let minutes = (normalized / 360.0 * 60.0).round() as u32;
    let minutes = if minutes == 0 { MIN_SESSION_MINUTES } else { minutes };
    minutes.clamp(MIN_SESSION_MINUTES, MAX_SESSION_MINUTES)
}

/// Angle at which the handle is drawn for a session length
pub fn minutes_to_angle(session_minutes: u32) -> f64 {
    (MAX_SESSION_MINUTES as f64 - session_minutes as f64) / MAX_SESSION_MINUTES as f64 * 360.0
}
