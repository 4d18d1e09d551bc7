use std::{error::Error, fs};

use log::info;
use nonstationary_bandit::experiment::{Experiment, ExperimentConfig};

const OUTPUT_DIR: &str = "local";
const OUTPUT_PATH: &str = "local/nonstationary_testbed.csv";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let experiment = Experiment::new(ExperimentConfig::default())?;
    let results = experiment.run()?;
    let labels = results.labels();

    // Write the averaged series for plotting
    fs::create_dir_all(OUTPUT_DIR)?;
    let mut writer = csv::Writer::from_path(OUTPUT_PATH)?;

    let header = std::iter::once(String::from("step"))
        .chain(labels.iter().map(|l| format!("reward {}", l)))
        .chain(labels.iter().map(|l| format!("optimal {}", l)));
    writer.write_record(header)?;

    for row in results.rows() {
        let record = std::iter::once(row.step.to_string())
            .chain(row.avg_reward.iter().map(f64::to_string))
            .chain(row.avg_optimal_rate.iter().map(f64::to_string));
        writer.write_record(record)?;
    }
    writer.flush()?;

    let last = results.steps().end - 1;
    for (i, label) in labels.iter().enumerate() {
        info!(
            "{}: average reward {:.4}, optimal hit rate {:.4}",
            label, results.avg_reward[i][last], results.avg_optimal_rate[i][last]
        );
    }
    info!("Wrote {}", OUTPUT_PATH);

    Ok(())
}
