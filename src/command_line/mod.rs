#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Command-line surface of the solver binary.

pub(crate) mod cli;
