use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    algo::tabular::SampleAverageAgent,
    env::Environment,
    error::{BanditError, Result},
    gym::{BanditConfig, KArmedBandit},
    util::{check_probability, transpose_iter},
};

/// Number of independent runs averaged together
pub const NUM_RUNS: usize = 2000;
/// Number of agent steps per run
pub const NUM_STEPS: usize = 10_000;
/// Exploration rates compared in every run
pub const EPSILONS: [f64; 3] = [0.0, 0.01, 0.1];
/// Number of bandit arms
pub const NUM_ARMS: usize = 10;
/// Standard deviation of the per-step random walk of the true means
pub const DRIFT_STD: f64 = 0.01;
/// Seed of the shared random stream
pub const SEED: u64 = 42;

/// Configuration for an [`Experiment`]
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentConfig {
    /// **Default**: [`NUM_RUNS`]
    pub runs: usize,
    /// **Default**: [`NUM_STEPS`]
    pub steps: usize,
    /// One agent per exploration rate, in this order
    ///
    /// **Default**: [`EPSILONS`]
    pub epsilons: Vec<f64>,
    /// **Default**: [`NUM_ARMS`] arms drifting with [`DRIFT_STD`], other parameters from [`BanditConfig::default`]
    pub bandit: BanditConfig,
    /// **Default**: [`SEED`]
    pub seed: u64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            runs: NUM_RUNS,
            steps: NUM_STEPS,
            epsilons: EPSILONS.to_vec(),
            bandit: BanditConfig {
                arms: NUM_ARMS,
                drift_std: DRIFT_STD,
                ..Default::default()
            },
            seed: SEED,
        }
    }
}

impl ExperimentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.runs == 0 {
            return Err(BanditError::InvalidRunCount);
        }
        if self.epsilons.is_empty() {
            return Err(BanditError::NoConfigurations);
        }
        self.epsilons.iter().try_for_each(|&e| check_probability(e))?;
        self.bandit.validate()
    }
}

/// Per-step averages over all runs, indexed by configuration then step
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentResults {
    pub epsilons: Vec<f64>,
    /// Average reward so far, shape `epsilons.len() x (steps + 1)`
    pub avg_reward: Vec<Vec<f64>>,
    /// Fraction of optimal pulls so far, shape `epsilons.len() x (steps + 1)`
    pub avg_optimal_rate: Vec<Vec<f64>>,
}

/// One step-major row of [`ExperimentResults`]
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub step: usize,
    /// One value per configuration
    pub avg_reward: Vec<f64>,
    /// One value per configuration
    pub avg_optimal_rate: Vec<f64>,
}

impl ExperimentResults {
    fn zeros(epsilons: &[f64], steps: usize) -> Self {
        Self {
            epsilons: epsilons.to_vec(),
            avg_reward: vec![vec![0.0; steps + 1]; epsilons.len()],
            avg_optimal_rate: vec![vec![0.0; steps + 1]; epsilons.len()],
        }
    }

    /// Step indices `0..=steps`
    pub fn steps(&self) -> std::ops::Range<usize> {
        0..self.avg_reward.first().map_or(0, Vec::len)
    }

    /// Legend label per configuration
    pub fn labels(&self) -> Vec<String> {
        self.epsilons
            .iter()
            .map(|&e| {
                if e == 0.0 {
                    String::from("greedy")
                } else {
                    format!("eps={}", e)
                }
            })
            .collect()
    }

    /// The results transposed into one row per step
    pub fn rows(&self) -> impl Iterator<Item = Row> {
        let rewards = transpose_iter(self.avg_reward.clone());
        let rates = transpose_iter(self.avg_optimal_rate.clone());
        rewards
            .zip(rates)
            .enumerate()
            .map(|(step, (avg_reward, avg_optimal_rate))| Row {
                step,
                avg_reward,
                avg_optimal_rate,
            })
    }
}

/// Compares epsilon greedy agents on a shared non-stationary bandit across many independent runs
pub struct Experiment {
    config: ExperimentConfig,
}

impl Experiment {
    /// **Errors** if any part of `config` is invalid, before any simulation work starts
    pub fn new(config: ExperimentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Run the experiment on a stream seeded with the configured seed
    pub fn run(&self) -> Result<ExperimentResults> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.run_with(&mut rng)
    }

    /// Run the experiment drawing every random number from `rng`
    ///
    /// Each run redraws the bandit in place, then every configuration starts from that run's initial means.
    /// Statistics at step `t` are read before the agent takes step `t`, so step `0` is always zero.
    pub fn run_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<ExperimentResults> {
        let ExperimentConfig {
            runs,
            steps,
            ref epsilons,
            ref bandit,
            ..
        } = self.config;

        info!(
            "Running {} runs of {} steps for epsilons {:?} on {} arms",
            runs, steps, epsilons, bandit.arms
        );

        let mut results = ExperimentResults::zeros(epsilons, steps);
        let mut env = KArmedBandit::new(bandit.clone(), rng)?;
        let weight = 1.0 / runs as f64;
        let milestone = (runs / 10).max(1);

        for run in 0..runs {
            if run > 0 {
                env.initialize(rng);
            }

            for (i, &epsilon) in epsilons.iter().enumerate() {
                env.reset();
                let mut agent = SampleAverageAgent::new(&mut env, epsilon)?;
                let rewards = &mut results.avg_reward[i];
                let rates = &mut results.avg_optimal_rate[i];
                for step in 0..=steps {
                    let stats = agent.stats();
                    rewards[step] += stats.average_reward * weight;
                    rates[step] += stats.optimal_hit_rate * weight;
                    agent.step_once(rng);
                }
                debug!(
                    "Run {} epsilon {}: average reward {:.4}, optimal hit rate {:.4}",
                    run,
                    epsilon,
                    agent.stats().average_reward,
                    agent.stats().optimal_hit_rate
                );
            }
            env.reset();

            if (run + 1) % milestone == 0 {
                info!("Completed {}/{} runs", run + 1, runs);
            }
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::stats::Stats;

    use super::*;

    fn small_config() -> ExperimentConfig {
        ExperimentConfig {
            runs: 4,
            steps: 50,
            ..Default::default()
        }
    }

    #[test]
    fn default_config_uses_constants() {
        let config = ExperimentConfig::default();
        assert_eq!(config.runs, 2000);
        assert_eq!(config.steps, 10_000);
        assert_eq!(config.epsilons, vec![0.0, 0.01, 0.1]);
        assert_eq!(config.bandit.arms, 10);
        assert_eq!(config.bandit.drift_std, 0.01);
        assert_eq!(config.bandit.initial_std, 1.0);
        assert_eq!(config.bandit.reward_std, 1.0);
        assert_eq!(config.seed, 42);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn invalid_config_fails_fast() {
        let cases = [
            ExperimentConfig {
                runs: 0,
                ..small_config()
            },
            ExperimentConfig {
                epsilons: vec![],
                ..small_config()
            },
            ExperimentConfig {
                epsilons: vec![0.1, 2.0],
                ..small_config()
            },
            ExperimentConfig {
                bandit: BanditConfig {
                    arms: 0,
                    ..Default::default()
                },
                ..small_config()
            },
        ];
        for config in cases {
            assert!(Experiment::new(config).is_err());
        }
    }

    #[test]
    fn results_have_expected_shape() {
        let results = Experiment::new(small_config()).unwrap().run().unwrap();
        assert_eq!(results.avg_reward.len(), 3);
        assert_eq!(results.avg_optimal_rate.len(), 3);
        for (rewards, rates) in results.avg_reward.iter().zip(&results.avg_optimal_rate) {
            assert_eq!(rewards.len(), 51);
            assert_eq!(rates.len(), 51);
            assert_eq!(rewards[0], 0.0, "Step 0 is read before any action");
            assert_eq!(rates[0], 0.0, "Step 0 is read before any action");
            assert!(rates.iter().all(|r| (0.0..=1.0).contains(r)));
        }
        assert_eq!(results.steps(), 0..51);
        assert_eq!(results.labels(), vec!["greedy", "eps=0.01", "eps=0.1"]);
    }

    #[test]
    fn same_seed_same_results() {
        let experiment = Experiment::new(small_config()).unwrap();
        assert_eq!(experiment.run().unwrap(), experiment.run().unwrap());

        let other = Experiment::new(ExperimentConfig {
            seed: 7,
            ..small_config()
        })
        .unwrap();
        assert_ne!(experiment.run().unwrap(), other.run().unwrap());
    }

    #[test]
    fn single_run_matches_raw_stats() {
        const STEPS: usize = 30;
        let config = ExperimentConfig {
            runs: 1,
            steps: STEPS,
            epsilons: vec![0.0, 0.1, 1.0],
            ..Default::default()
        };
        let results = Experiment::new(config.clone()).unwrap().run().unwrap();

        // Replay the same draw order by hand
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut env = KArmedBandit::new(config.bandit.clone(), &mut rng).unwrap();
        for (i, &epsilon) in config.epsilons.iter().enumerate() {
            env.reset();
            let mut agent = SampleAverageAgent::new(&mut env, epsilon).unwrap();
            let mut history: Vec<Stats> = Vec::with_capacity(STEPS + 1);
            for _ in 0..=STEPS {
                history.push(agent.stats());
                agent.step_once(&mut rng);
            }
            for (step, stats) in history.iter().enumerate() {
                assert_eq!(results.avg_reward[i][step], stats.average_reward);
                assert_eq!(results.avg_optimal_rate[i][step], stats.optimal_hit_rate);
            }
        }
    }

    #[test]
    fn every_run_redraws_the_bandit() {
        const STEPS: usize = 20;
        let config = ExperimentConfig {
            runs: 3,
            steps: STEPS,
            epsilons: vec![0.0, 0.1],
            ..Default::default()
        };
        let experiment = Experiment::new(config.clone()).unwrap();
        assert_eq!(experiment.config(), &config);
        let results = experiment.run().unwrap();

        // Replay the same draw order by hand, accumulating in the same order
        let weight = 1.0 / config.runs as f64;
        let mut rewards = vec![vec![0.0; STEPS + 1]; config.epsilons.len()];
        let mut rates = vec![vec![0.0; STEPS + 1]; config.epsilons.len()];
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut env = KArmedBandit::new(config.bandit.clone(), &mut rng).unwrap();
        let mut initial_means = Vec::new();
        for run in 0..config.runs {
            if run > 0 {
                env.initialize(&mut rng);
            }
            initial_means.push(env.initial_means().to_vec());
            for (i, &epsilon) in config.epsilons.iter().enumerate() {
                env.reset();
                let mut agent = SampleAverageAgent::new(&mut env, epsilon).unwrap();
                for step in 0..=STEPS {
                    let stats = agent.stats();
                    rewards[i][step] += stats.average_reward * weight;
                    rates[i][step] += stats.optimal_hit_rate * weight;
                    agent.step_once(&mut rng);
                }
            }
            env.reset();
        }

        assert_ne!(initial_means[0], initial_means[1], "Run 1 starts from fresh means");
        assert_ne!(initial_means[1], initial_means[2], "Run 2 starts from fresh means");
        assert_eq!(results.avg_reward, rewards);
        assert_eq!(results.avg_optimal_rate, rates);
    }

    #[test]
    fn configurations_share_initial_means() {
        let config = ExperimentConfig {
            runs: 1,
            steps: 10,
            epsilons: vec![0.0, 0.0],
            bandit: BanditConfig {
                reward_std: 0.0,
                drift_std: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let results = Experiment::new(config).unwrap().run().unwrap();
        assert_eq!(
            results.avg_reward[0], results.avg_reward[1],
            "Noise-free greedy agents on the same means behave identically"
        );
    }

    #[test]
    fn deterministic_bandit_scenario() {
        let config = ExperimentConfig {
            runs: 4,
            steps: 100,
            bandit: BanditConfig {
                arms: 2,
                initial_std: 0.0,
                reward_std: 0.0,
                drift_std: 0.0,
            },
            ..Default::default()
        };
        let results = Experiment::new(config).unwrap().run().unwrap();
        for (rewards, rates) in results.avg_reward.iter().zip(&results.avg_optimal_rate) {
            assert!(rewards.iter().all(|&r| r == 0.0));
            assert!(rates[1..].iter().all(|&r| r == 1.0));
        }
    }

    #[test]
    fn exploration_finds_better_arms() {
        let config = ExperimentConfig {
            runs: 200,
            steps: 500,
            epsilons: vec![0.0, 0.1],
            ..Default::default()
        };
        let results = Experiment::new(config).unwrap().run().unwrap();
        let last = results.steps().end - 1;
        assert!(results.avg_optimal_rate[1][last] > results.avg_optimal_rate[0][last]);
    }

    #[test]
    fn rows_are_step_major() {
        let results = Experiment::new(small_config()).unwrap().run().unwrap();
        let rows = results.rows().collect::<Vec<_>>();
        assert_eq!(rows.len(), 51);
        for row in &rows {
            assert_eq!(row.avg_reward.len(), 3);
            for i in 0..3 {
                assert_eq!(row.avg_reward[i], results.avg_reward[i][row.step]);
                assert_relative_eq!(row.avg_optimal_rate[i], results.avg_optimal_rate[i][row.step]);
            }
        }
    }
}
