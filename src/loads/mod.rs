//! Load patterns, cases, combinations, and the loads that populate a pattern.

mod case;
mod combination;
mod direction;
mod distributed_load;
mod pattern;
mod point_load;

pub use case::{LoadCase, PatternFactor};
pub use combination::{CaseFactor, LoadCombination};
pub use direction::Direction;
pub use distributed_load::DistributedFrameLoad;
pub use pattern::LoadPattern;
pub use point_load::PointLoad;
