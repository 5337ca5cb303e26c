//! Step definitions for task audit trail scenarios.

pub mod world;

mod given;
mod then;
mod when;
