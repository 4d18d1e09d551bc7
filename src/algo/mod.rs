/// Tabular methods
pub mod tabular;
