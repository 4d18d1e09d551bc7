/// Implemented agents
pub mod algo;

/// Environment
pub mod env;

/// Error types
pub mod error;

/// Experiment driver comparing exploration rates across independent runs
pub mod experiment;

/// Exploration policies
pub mod exploration;

/// Testing environments
pub mod gym;

/// Running agent statistics
pub mod stats;

mod util;

pub use error::{BanditError, Result};
