//! Puzzles solvable by search.
//!
//! Each puzzle exposes its configurations as a [`crate::space::State`] so any
//! algorithm can explore them.

pub mod crossing;
pub mod hoppers;
pub mod strings;
