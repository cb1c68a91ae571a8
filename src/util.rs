/// Arithmetic mean of the samples, `None` when there are none
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Population standard deviation
pub fn std_dev(samples: &[f64]) -> Option<f64> {
    let avg = mean(samples)?;
    let variance = samples
        .iter()
        .map(|value| {
            let diff = avg - value;
            diff * diff
        })
        .sum::<f64>()
        / samples.len() as f64;

    Some(variance.sqrt())
}
