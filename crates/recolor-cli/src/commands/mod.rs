//! CLI command implementations

pub mod recolor;
pub mod view;
