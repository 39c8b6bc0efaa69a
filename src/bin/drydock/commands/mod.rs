//! Command implementations

pub mod completions;
pub mod doctor;
pub mod matrix;
pub mod provision;
