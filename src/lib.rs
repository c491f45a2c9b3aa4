//! Hexsort: turn cards off a shuffled deck until you've collected every card
//! of the target color, then see how your time stacks up.

pub mod app;
pub mod colors;
pub mod config;
pub mod deck;
pub mod error;
pub mod leaderboard;
pub mod name_entry;
pub mod render;
pub mod round;

pub use error::{Error, Result};
