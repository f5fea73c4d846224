//! Step definitions for task relationship scenarios.

pub mod given;
pub mod when;
pub mod world;
