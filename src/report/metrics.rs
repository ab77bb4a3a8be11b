//! Parsing of metric tool and reconstructor output

use crate::io::error::{Result, parse_error};

/// Marker preceding the CPU time in reconstructor output
pub const CPU_TIME_MARKER: &str = "CPU Time:";

/// Decimal places kept for mean squared errors
pub const MSE_DECIMALS: usize = 2;

/// Parse the single number printed by the metric tool
///
/// # Errors
///
/// Returns a parse error if the trimmed text is not a finite number
pub fn parse_mse(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(parse_error("mean squared error", &trimmed)),
    }
}

/// Round to the persisted precision, ties to even
pub fn round_mse(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Text persisted for a mean squared error, always two decimals
pub fn format_mse(value: f64) -> String {
    format!("{:.*}", MSE_DECIMALS, round_mse(value))
}

/// Extract the CPU time reported by a reconstructor
///
/// Uses the last line containing the marker; the value is the text between
/// the first and second colon of that line.
///
/// # Errors
///
/// Returns a parse error if no line contains the marker
pub fn parse_cpu_time(captured: &str) -> Result<String> {
    captured
        .lines()
        .rfind(|line| line.contains(CPU_TIME_MARKER))
        .and_then(|line| line.split(':').nth(1))
        .map(|value| value.trim().to_string())
        .ok_or_else(|| parse_error("CPU time", &captured))
}
