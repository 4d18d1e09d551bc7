use log::debug;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::{
    env::{Environment, Outcome},
    error::{BanditError, Result},
    util::{argmax, check_std},
};

/// Configuration for the [`KArmedBandit`]
#[derive(Debug, Clone, PartialEq)]
pub struct BanditConfig {
    /// Number of arms
    ///
    /// **Default**: `10`
    pub arms: usize,
    /// Standard deviation of the normal distribution the initial true means are drawn from
    ///
    /// **Default**: `1.0`
    pub initial_std: f64,
    /// Standard deviation of the reward noise around an arm's true mean
    ///
    /// **Default**: `1.0`
    pub reward_std: f64,
    /// Standard deviation of the random walk increment added to every true mean on every step
    ///
    /// **Default**: `0.01`
    pub drift_std: f64,
}

impl Default for BanditConfig {
    fn default() -> Self {
        Self {
            arms: 10,
            initial_std: 1.0,
            reward_std: 1.0,
            drift_std: 0.01,
        }
    }
}

impl BanditConfig {
    pub fn validate(&self) -> Result<()> {
        if self.arms == 0 {
            return Err(BanditError::InvalidArmCount(self.arms));
        }
        check_std("initial_std", self.initial_std)?;
        check_std("reward_std", self.reward_std)?;
        check_std("drift_std", self.drift_std)
    }
}

/// Non-stationary K-armed bandit environment
///
/// Each arm pays a normally distributed reward around a hidden true mean. After every pull, all true means
/// take an independent random walk step, so the best arm can change over time.
#[derive(Debug, Clone)]
pub struct KArmedBandit {
    config: BanditConfig,
    means: Vec<f64>,
    initial_means: Vec<f64>,
    initial: Normal<f64>,
    noise: Normal<f64>,
    drift: Normal<f64>,
}

impl KArmedBandit {
    /// Initialize a new bandit, drawing the true means from `rng`
    pub fn new<R: Rng + ?Sized>(config: BanditConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let mut bandit = Self {
            means: vec![0.0; config.arms],
            initial_means: vec![0.0; config.arms],
            initial: Normal::new(0.0, config.initial_std)?,
            noise: Normal::new(0.0, config.reward_std)?,
            drift: Normal::new(0.0, config.drift_std)?,
            config,
        };
        bandit.initialize(rng);
        Ok(bandit)
    }

    /// Redraw every true mean from N(0, `initial_std`) and store the result as the new restore point
    pub fn initialize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for mean in self.means.iter_mut() {
            *mean = self.initial.sample(rng);
        }
        self.initial_means.copy_from_slice(&self.means);
        debug!("Initialized bandit means: {:?}", self.means);
    }

    pub fn config(&self) -> &BanditConfig {
        &self.config
    }

    /// The current true mean of every arm
    pub fn true_means(&self) -> &[f64] {
        &self.means
    }

    /// The true means as of the last initialization
    pub fn initial_means(&self) -> &[f64] {
        &self.initial_means
    }

    /// The lowest-indexed arm with the highest current true mean
    pub fn optimal_arm(&self) -> usize {
        argmax(&self.means)
    }
}

impl Environment for KArmedBandit {
    fn arm_count(&self) -> usize {
        self.means.len()
    }

    fn step<R: Rng + ?Sized>(&mut self, arm: usize, rng: &mut R) -> Outcome {
        assert!(arm < self.means.len(), "Invalid action: {}", arm);

        let mean = self.means[arm];
        let optimal = self.means.iter().all(|&m| m <= mean);
        let reward = mean + self.noise.sample(rng);

        for m in self.means.iter_mut() {
            *m += self.drift.sample(rng);
        }

        Outcome { reward, optimal }
    }

    fn reset(&mut self) {
        self.means.copy_from_slice(&self.initial_means);
    }
}
