use thiserror::Error;

/// Result type alias for bandit construction and configuration
pub type Result<T> = std::result::Result<T, BanditError>;

/// Errors raised while constructing environments, agents or experiments
///
/// Stepping never fails, so every variant describes a bad parameter caught before the simulation starts.
#[derive(Debug, Error)]
pub enum BanditError {
    #[error("invalid arm count {0}, a bandit needs at least one arm")]
    InvalidArmCount(usize),

    #[error("invalid exploration rate {0}, must be in the interval [0, 1]")]
    InvalidEpsilon(f64),

    #[error("invalid value {value} for `{name}`, must be finite and non-negative")]
    InvalidStd { name: &'static str, value: f64 },

    #[error("an experiment needs at least one run")]
    InvalidRunCount,

    #[error("an experiment needs at least one exploration rate")]
    NoConfigurations,

    /// Not produced for configurations that pass [`BanditConfig::validate`](crate::gym::BanditConfig::validate)
    #[error("distribution error: {0}")]
    Distribution(#[from] rand_distr::NormalError),
}
