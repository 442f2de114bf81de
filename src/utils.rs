/// Rounds to one decimal place, matching the precision of the bundled
/// temperature and wind tables.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rounds to two decimal places (confidence scores).
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
