//! Load direction conventions.

use serde::{Deserialize, Serialize};

/// Direction a distributed frame load acts in.
///
/// `Global*` and `Gravity` are resolved without reference to member
/// geometry. `Local*` are resolved against the *original* frame's local
/// axes (see the frame-load decomposition in the assembler), never the
/// sub-segment's, so the direction stays constant across a meshed run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Direction {
    GlobalX,
    GlobalY,
    GlobalZ,
    Gravity,
    LocalX,
    LocalY,
    LocalZ,
}

impl Direction {
    pub fn is_local(self) -> bool {
        matches!(self, Direction::LocalX | Direction::LocalY | Direction::LocalZ)
    }
}
