//! Core data models for doko-stats.

mod game;
mod rows;
mod stats;

pub use game::*;
pub use rows::*;
pub use stats::*;
