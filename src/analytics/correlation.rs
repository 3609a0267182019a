//! Sample Pearson correlation between two price vectors

/// Arithmetic mean of the values
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample covariance with the n-1 denominator
fn covariance(x: &[f64], y: &[f64]) -> f64 {
    let mean_x = mean(x);
    let mean_y = mean(y);

    let mut sum = 0.0;
    for i in 0..x.len() {
        sum += (x[i] - mean_x) * (y[i] - mean_y);
    }
    sum / (x.len() as f64 - 1.0)
}

/// Bessel-corrected sample standard deviation
fn std_dev(values: &[f64]) -> f64 {
    let mean_value = mean(values);

    let mut sum = 0.0;
    for value in values {
        let diff = value - mean_value;
        sum += diff * diff;
    }
    (sum / (values.len() as f64 - 1.0)).sqrt()
}

/// Sample Pearson correlation coefficient
///
/// Inputs must already be trimmed to equal length; unequal lengths panic.
/// A constant series has zero standard deviation and yields NaN, as does
/// input shorter than two points (division by n-1 = 0). Both propagate to
/// the caller unchanged.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    assert_eq!(x.len(), y.len(), "series must be trimmed to equal length");
    covariance(x, y) / (std_dev(x) * std_dev(y))
}
