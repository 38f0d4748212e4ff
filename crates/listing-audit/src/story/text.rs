use crate::legality::CategoryCounts;
use chrono::NaiveDate;
use serde::Serialize;

/// Two lines of explanation shown over the diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Narration {
    pub top: String,
    pub bottom: String,
}

impl Narration {
    fn new(top: impl Into<String>, bottom: impl Into<String>) -> Self {
        Self {
            top: top.into(),
            bottom: bottom.into(),
        }
    }
}

/// Formats a count with comma thousands separators.
pub fn format_count(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Share as a percentage with one decimal place, `0.0` when `total` is zero.
pub fn format_percent(part: usize, total: usize) -> String {
    if total == 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", part as f64 / total as f64 * 100.0)
}

pub(crate) fn format_snapshot_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub(crate) fn intro(counts: &CategoryCounts, snapshot_date: NaiveDate) -> Narration {
    Narration::new(
        format!(
            "As of {}, there were {} Airbnb listings in NYC.",
            format_snapshot_date(snapshot_date),
            format_count(counts.all)
        ),
        format!(
            "{}% of them were illegal.",
            format_percent(counts.illegal, counts.all)
        ),
    )
}

pub(crate) fn totals(counts: &CategoryCounts) -> Narration {
    Narration::new(
        "Renting a house or condo is always legal.",
        format!(
            "However, the {} apartments listed might be illegal.",
            format_count(counts.apartment)
        ),
    )
}

pub(crate) fn short_stays(counts: &CategoryCounts) -> Narration {
    Narration::new(
        "It's usually illegal to rent an apartment for fewer than 30 days.",
        format!(
            "Only {} listed apartments were above this limit.",
            format_count(counts.legal_long_stays())
        ),
    )
}

pub(crate) fn host_presence() -> Narration {
    Narration::new(
        "A short-term apartment rental is still legal if the host is on the premises.",
        "We had three methods of estimating when they're not.",
    )
}

pub(crate) fn full_home(counts: &CategoryCounts) -> Narration {
    Narration::new(
        "Renting a full home/apartment means the host probably isn't there.",
        format!(
            "This accounts for {} listings.",
            format_count(counts.full_apt)
        ),
    )
}

pub(crate) fn multiple_listings(counts: &CategoryCounts) -> Narration {
    Narration::new(
        "Hosts with multiple listings definitely aren't living in all of them.",
        format!(
            "That's another {} listings.",
            format_count(counts.host_mult)
        ),
    )
}

pub(crate) fn host_away(counts: &CategoryCounts) -> Narration {
    Narration::new(
        "If the host isn't located in NYC, they aren't living at the listed property.",
        format!(
            "{} listings met this criterion.",
            format_count(counts.host_away)
        ),
    )
}

pub(crate) fn remaining_short_stays(counts: &CategoryCounts) -> Narration {
    Narration::new(
        format!(
            "{} short-term apartments didn't meet any of these three tests.",
            format_count(counts.legal_short_stays())
        ),
        "Those listings are most likely legal.",
    )
}

pub(crate) fn verdict(counts: &CategoryCounts) -> Narration {
    Narration::new(
        format!(
            "Combining the results of those three tests gives us {} illegal listings.",
            format_count(counts.illegal)
        ),
        format!(
            "They represent {}% of the original {} listings.",
            format_percent(counts.illegal, counts.all),
            format_count(counts.all)
        ),
    )
}
