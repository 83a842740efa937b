//! # doko-stats
//!
//! Records Doppelkopf game results and derives statistics across all games.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (games, derived rows, statistics)
//! - **storage**: JSON game store in the data directory
//! - **entry**: Validation and interactive entry of new games
//! - **tabulate**: Expansion of games into player and game tables
//! - **calculate**: Statistics computation over the tables
//! - **report**: Flattening and grid rendering of computed statistics
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod config;
pub mod entry;
pub mod models;
pub mod report;
pub mod storage;
pub mod tabulate;

pub use models::*;
