/// Running performance statistics of an agent
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stats {
    /// Number of steps taken
    pub steps: u64,
    /// Sum of all rewards received
    pub accumulated_reward: f64,
    /// `accumulated_reward / steps`, or `0` before the first step
    pub average_reward: f64,
    /// Fraction of steps on which the selected arm had the highest true mean
    pub optimal_hit_rate: f64,
}

impl Stats {
    /// Record the outcome of one step
    pub fn record(&mut self, reward: f64, optimal: bool) {
        let hit = if optimal { 1.0 } else { 0.0 };
        self.optimal_hit_rate = incremental_mean(self.optimal_hit_rate, hit, self.steps);
        self.steps += 1;
        self.accumulated_reward += reward;
        self.average_reward = self.accumulated_reward / self.steps as f64;
    }
}

/// Fold sample `x` into a mean of `n` previous samples
///
/// mean<sub>n+1</sub> = mean<sub>n</sub> + (x - mean<sub>n</sub>) / (n + 1)
pub fn incremental_mean(mean: f64, x: f64, n: u64) -> f64 {
    mean + (x - mean) / (n + 1) as f64
}
