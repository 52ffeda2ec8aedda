use shadow_rs::shadow;

shadow!(build);

// Search space and problems
// -------------------------
pub mod problem;
pub mod search;
pub mod space;

// Puzzles
// -------
pub mod problems;

// Algorithms
// ----------
pub mod algorithms;

// Interactive play
// ----------------
pub mod model;
