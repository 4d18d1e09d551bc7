use rand::Rng;

use crate::{error::Result, util::check_probability};

use super::Choice;

/// Epsilon greedy exploration policy with a fixed exploration rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonGreedy {
    epsilon: f64,
}

impl EpsilonGreedy {
    /// Initialize epsilon greedy policy with exploration rate `epsilon`
    ///
    /// **Errors** if `epsilon` is not in the interval `[0,1]`
    pub fn new(epsilon: f64) -> Result<Self> {
        check_probability(epsilon)?;
        Ok(Self { epsilon })
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Invoke epsilon greedy policy
    ///
    /// Always consumes exactly one uniform draw from `rng`, whatever the exploration rate.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Choice {
        if rng.gen::<f64>() < self.epsilon {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }
}
