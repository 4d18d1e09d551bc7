use rand::Rng;

/// The result of pulling one arm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    /// The sampled reward
    pub reward: f64,
    /// Whether the pulled arm had the highest true mean at the time of the pull
    pub optimal: bool,
}

/// Represents a bandit environment with a fixed, finite set of arms
///
/// The random stream is passed into every call that draws from it, so the caller controls draw order
/// and tests can inject a deterministic stream.
pub trait Environment {
    /// Get the number of arms
    ///
    /// This never changes over the lifetime of the environment and is always at least 1.
    fn arm_count(&self) -> usize;

    /// Pull `arm`, producing a reward and whether the arm was optimal, then advance the environment one step
    ///
    /// **Panics** if `arm` is not in `0..arm_count()`
    fn step<R: Rng + ?Sized>(&mut self, arm: usize, rng: &mut R) -> Outcome;

    /// Restore the environment to its initial state
    fn reset(&mut self);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Replays a fixed schedule of outcomes, cycling when it runs out, and records which arms were pulled
    pub struct ScriptedEnv {
        arms: usize,
        script: Vec<Outcome>,
        t: usize,
        pub pulls: Vec<usize>,
    }

    impl ScriptedEnv {
        pub fn new(arms: usize, script: Vec<Outcome>) -> Self {
            assert!(!script.is_empty());
            Self {
                arms,
                script,
                t: 0,
                pulls: Vec::new(),
            }
        }

        /// Always returns `reward` and reports every pull as optimal
        pub fn constant(arms: usize, reward: f64) -> Self {
            Self::new(
                arms,
                vec![Outcome {
                    reward,
                    optimal: true,
                }],
            )
        }
    }

    impl Environment for ScriptedEnv {
        fn arm_count(&self) -> usize {
            self.arms
        }

        fn step<R: Rng + ?Sized>(&mut self, arm: usize, _rng: &mut R) -> Outcome {
            assert!(arm < self.arms, "Invalid action: {}", arm);
            let outcome = self.script[self.t % self.script.len()];
            self.t += 1;
            self.pulls.push(arm);
            outcome
        }

        fn reset(&mut self) {
            self.t = 0;
        }
    }
}
