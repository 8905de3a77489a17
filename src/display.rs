//! Formatting and sanity checks at the presentation boundary.

use crate::transform::DiversityPoint;

/// Rows that carry a single plotted value.
pub trait ChartValue {
    fn chart_value(&self) -> Option<f64>;
}

impl ChartValue for DiversityPoint {
    fn chart_value(&self) -> Option<f64> {
        Some(self.value)
    }
}

impl ChartValue for f64 {
    fn chart_value(&self) -> Option<f64> {
        Some(*self)
    }
}

impl ChartValue for Option<f64> {
    fn chart_value(&self) -> Option<f64> {
        *self
    }
}

/// True when there is something to draw: at least one row with a non-NaN value.
pub fn validate_chart_data<T: ChartValue>(data: &[T]) -> bool {
    data.iter()
        .any(|row| row.chart_value().is_some_and(|v| !v.is_nan()))
}

/// `12.345` with 1 decimal → `"12.3%"`.
pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}%")
}

/// en-US grouping with at most three fraction digits: `1234567.5` → `"1,234,567.5"`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 5);
    if value < 0.0 {
        grouped.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if !frac_part.is_empty() {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_decimals() {
        assert_eq!(format_percentage(10.060_975, 1), "10.1%");
        assert_eq!(format_percentage(42.0, 0), "42%");
        assert_eq!(format_percentage(3.14159, 2), "3.14%");
    }

    #[test]
    fn number_grouping() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(1_234_567.5), "1,234,567.5");
        assert_eq!(format_number(-45_000.125), "-45,000.125");
        assert_eq!(format_number(2.0004), "2");
        assert_eq!(format_number(f64::INFINITY), "∞");
    }

    #[test]
    fn validation() {
        let empty: [f64; 0] = [];
        assert!(!validate_chart_data(&empty));
        assert!(!validate_chart_data(&[f64::NAN]));
        assert!(validate_chart_data(&[f64::NAN, 1.0]));
        assert!(!validate_chart_data(&[None::<f64>, None]));

        let rows = vec![DiversityPoint {
            method: "direct".into(),
            value: 12.0,
            category: "poem".into(),
        }];
        assert!(validate_chart_data(&rows));
    }
}
