use chrono::NaiveDate;

/// Signed number of calendar days from `from` to `to` (`to - from`).
///
/// `None` when either date is missing. Dates carry no time of day, so the
/// result never depends on the hour a milestone was recorded.
pub fn day_difference(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Option<i64> {
    match (from, to) {
        (Some(from), Some(to)) => Some((to - from).num_days()),
        _ => None,
    }
}

/// Variant used only when summing schedule terms, where a missing date
/// contributes nothing.
pub fn day_difference_or_zero(from: Option<NaiveDate>, to: Option<NaiveDate>) -> i64 {
    day_difference(from, to).unwrap_or(0)
}
