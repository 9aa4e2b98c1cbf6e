//! # Tutor Chess
//!
//! The data core of a chess tutorial site: board state, a strict FEN codec,
//! the widget-facing position map, and lesson progress persistence.
pub mod board;
pub mod core;
pub mod progress;
pub mod view;

pub use board::{Board, FenParseError, START_FEN};
pub use core::*;
pub use progress::{Level, LessonProgress, MemoryStore, ProgressError, ProgressStore};
pub use view::PositionMap;
