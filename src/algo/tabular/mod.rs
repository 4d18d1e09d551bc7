pub mod sample_average;

pub use sample_average::SampleAverageAgent;
