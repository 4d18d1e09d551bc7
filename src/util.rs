use crate::error::{BanditError, Result};

/// Index of the largest value, preferring the lowest index on ties
///
/// **Panics** if `values` is empty
pub fn argmax(values: &[f64]) -> usize {
    assert!(!values.is_empty(), "Cannot take the argmax of an empty slice");
    values
        .iter()
        .enumerate()
        .skip(1)
        .fold(0, |best, (i, &x)| if x > values[best] { i } else { best })
}

/// Check that a probability lies in `[0,1]`, rejecting NaN
pub fn check_probability(value: f64) -> Result<()> {
    (0.0..=1.0)
        .contains(&value)
        .then_some(())
        .ok_or(BanditError::InvalidEpsilon(value))
}

/// Check that a standard deviation is finite and non-negative
pub fn check_std(name: &'static str, value: f64) -> Result<()> {
    (value.is_finite() && value >= 0.0)
        .then_some(())
        .ok_or(BanditError::InvalidStd { name, value })
}

pub fn transpose_iter<T>(v: Vec<Vec<T>>) -> impl Iterator<Item = Vec<T>> {
    let len = v.first().map_or(0, Vec::len);
    let mut iters = v.into_iter().map(|n| n.into_iter()).collect::<Vec<_>>();
    (0..len).map(move |_| iters.iter_mut().filter_map(|n| n.next()).collect())
}
