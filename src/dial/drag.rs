//! Pointer drag sessions on the dial handle

use std::time::Instant;

use tracing::debug;

use super::geometry::{DialGeometry, Point};

/// An in-progress drag of the dial handle.
///
/// A session exists only between a press on the handle and the matching
/// release. Dropping it ends the drag, so holding it in an `Option` and
/// taking it out is all the cleanup a caller needs.
#[derive(Debug)]
pub struct DragSession {
    geometry: DialGeometry,
    started_at: Instant,
    last_pointer: Point,
    moves: u32,
}

impl DragSession {
    /// Begin a drag if `pointer` lands on the handle for `session_minutes`
    pub fn begin(geometry: DialGeometry, pointer: Point, session_minutes: u32) -> Option<Self> {
        if !geometry.hits_handle(pointer, session_minutes) {
            debug!("Press at ({:.1}, {:.1}) missed the dial handle", pointer.x, pointer.y);
            return None;
        }

        debug!("Drag session started at ({:.1}, {:.1})", pointer.x, pointer.y);
        Some(Self {
            geometry,
            started_at: Instant::now(),
            last_pointer: pointer,
            moves: 0,
        })
    }

    /// Minutes selected by the pointer that opened the session
    pub fn initial_minutes(&self) -> u32 {
        self.geometry.minutes_at(self.last_pointer)
    }

    /// Track a pointer move and return the minutes it selects
    pub fn move_to(&mut self, pointer: Point) -> u32 {
        self.last_pointer = pointer;
        self.moves += 1;
        self.geometry.minutes_at(pointer)
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn last_pointer(&self) -> Point {
        self.last_pointer
    }
}

impl Drop for DragSession {
    fn drop(&mut self) {
        debug!(
            "Drag session ended after {} moves ({}ms)",
            self.moves,
            self.started_at.elapsed().as_millis()
        );
    }
}
