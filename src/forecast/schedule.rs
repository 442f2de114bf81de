//! Lays out the calendar a forecast walks: month labels advance over the full
//! twelve-month calendar while pattern slots cycle over the six bundled
//! patterns.

use crate::types::dataset::PatternSlot;
use chrono::{Datelike, Months, NaiveDate};

/// Months synthesized when the caller does not pick a horizon.
pub(crate) const DEFAULT_HORIZON: usize = 6;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One entry of the forecast calendar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScheduledMonth {
    /// Calendar month number `1..=12`, wrapping across the year end.
    pub(crate) month_number: u32,
    /// Pattern slot to read, cycling `1..=6`.
    pub(crate) pattern_slot: PatternSlot,
    /// The query date advanced by this entry's offset in whole months.
    pub(crate) date: NaiveDate,
}

/// Lays out `horizon` consecutive months starting at `today`'s month.
///
/// Dates advance by calendar months with the day-of-month clamped to the
/// target month's length (Jan 31 + 1 month is the last day of February).
pub(crate) fn schedule(today: NaiveDate, horizon: usize) -> Vec<ScheduledMonth> {
    (0..horizon)
        .map(|offset| {
            let month_index = (today.month0() as usize + offset) % 12;
            ScheduledMonth {
                month_number: month_index as u32 + 1,
                pattern_slot: PatternSlot::for_offset(offset),
                date: today
                    .checked_add_months(Months::new(offset as u32))
                    .unwrap_or(NaiveDate::MAX),
            }
        })
        .collect()
}

/// Short English name for a calendar month number (`1..=12`).
pub(crate) fn month_name(month_number: u32) -> &'static str {
    MONTH_NAMES[month_number.saturating_sub(1) as usize % 12]
}
