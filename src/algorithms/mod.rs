//! Implementation of search algorithms.
//!
//! These algorithms can do path-finding on any puzzle whose configurations
//! implement [`crate::space::State`].

pub mod bfs;
