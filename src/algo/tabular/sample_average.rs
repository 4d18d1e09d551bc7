use rand::Rng;

use crate::{
    env::Environment,
    error::Result,
    exploration::{Choice, EpsilonGreedy},
    stats::{incremental_mean, Stats},
    util::argmax,
};

/// An entry in the table
#[derive(Default, Debug, Clone, Copy)]
struct Entry {
    value: f64,
    count: u64,
}

/// Epsilon greedy agent that estimates each arm's value as the sample average of its rewards
///
/// The agent borrows its environment for its whole lifetime and observes the environment's live state.
/// Values are updated using the rule:
///
/// Q<sub>n+1</sub> = Q<sub>n</sub> + (R<sub>n</sub> - Q<sub>n</sub>) / (n + 1)
///
/// where n is the number of times the arm was pulled before this reward.
pub struct SampleAverageAgent<'a, E: Environment> {
    env: &'a mut E,
    exploration: EpsilonGreedy,
    table: Vec<Entry>,
    stats: Stats,
}

impl<'a, E: Environment> SampleAverageAgent<'a, E> {
    /// Initialize a new `SampleAverageAgent` bound to `env`, exploring at rate `epsilon`
    ///
    /// **Errors** if `epsilon` is not in the interval `[0,1]`
    pub fn new(env: &'a mut E, epsilon: f64) -> Result<Self> {
        let exploration = EpsilonGreedy::new(epsilon)?;
        let table = vec![Entry::default(); env.arm_count()];
        Ok(Self {
            env,
            exploration,
            table,
            stats: Stats::default(),
        })
    }

    pub fn epsilon(&self) -> f64 {
        self.exploration.epsilon()
    }

    /// Current value estimate per arm
    pub fn estimates(&self) -> Vec<f64> {
        self.table.iter().map(|e| e.value).collect()
    }

    /// Number of pulls per arm
    pub fn counts(&self) -> Vec<u64> {
        self.table.iter().map(|e| e.count).collect()
    }

    /// Snapshot of the running statistics
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Choose an arm with the epsilon greedy policy
    ///
    /// Exploiting picks the arm with the highest estimate, preferring the lowest index on ties.
    pub fn select_arm<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        match self.exploration.choose(rng) {
            Choice::Explore => rng.gen_range(0..self.table.len()),
            Choice::Exploit => argmax(&self.estimates()),
        }
    }

    /// Pull one arm and learn from the outcome
    pub fn step_once<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let arm = self.select_arm(rng);
        let outcome = self.env.step(arm, rng);

        let entry = &mut self.table[arm];
        entry.value = incremental_mean(entry.value, outcome.reward, entry.count);
        entry.count += 1;

        self.stats.record(outcome.reward, outcome.optimal);
    }

    pub fn run_steps<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) {
        for _ in 0..n {
            self.step_once(rng);
        }
    }
}
