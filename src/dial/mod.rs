//! Circular session dial
//!
//! Converts pointer positions on the dial into session lengths and computes
//! where the handle and progress ring are drawn.

pub mod drag;
pub mod geometry;

pub use drag::DragSession;
pub use geometry::{angle_to_minutes, point_to_angle, DialGeometry, Point};
