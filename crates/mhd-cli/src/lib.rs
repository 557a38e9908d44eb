//! CLI library components for the mental-health table loader.

pub mod logging;
pub mod pipeline;
