// SPDX-FileCopyrightText: 2026 Koyomi contributors
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

/// Windowing strategy for the visible calendar.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ViewMode {
    /// A full calendar month, padded on the left back to Sunday.
    #[default]
    Month,

    /// A single Sunday-through-Saturday week.
    Week,
}

/// Direction of a window shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// The canonical date format shared by grid cells, stored events and the
/// editor draft. Day-cell joins are exact string comparisons on this form.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats a date in the canonical `YYYY-MM-DD` form.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a canonical `YYYY-MM-DD` string back into a date.
pub fn parse_date_key(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Computes the ordered cell dates visible for `anchor` in `mode`.
///
/// Month mode covers the whole calendar month containing `anchor`,
/// left-padded with trailing days of the previous month so the sequence
/// starts on a Sunday. There is no trailing padding, so the length varies
/// with the month and its weekday alignment; renderers wrap into rows of
/// seven rather than assuming a fixed cell count. Week mode is exactly the
/// seven days of the week containing `anchor`.
pub fn compute_view(anchor: NaiveDate, mode: ViewMode) -> Vec<NaiveDate> {
    match mode {
        ViewMode::Month => month_view(anchor),
        ViewMode::Week => week_view(anchor),
    }
}

fn month_view(anchor: NaiveDate) -> Vec<NaiveDate> {
    let first = anchor - Days::new(u64::from(anchor.day0()));
    let last = last_of_month(first);
    let start = first.week(Weekday::Sun).first_day();
    start.iter_days().take_while(|day| *day <= last).collect()
}

fn week_view(anchor: NaiveDate) -> Vec<NaiveDate> {
    let start = anchor.week(Weekday::Sun).first_day();
    start.iter_days().take(7).collect()
}

fn last_of_month(first: NaiveDate) -> NaiveDate {
    match first.checked_add_months(Months::new(1)) {
        Some(next_first) => next_first - Days::new(1),
        None => NaiveDate::MAX,
    }
}

/// Shifts `anchor` one window in `direction`.
///
/// Month mode moves by one calendar month, clamping to the last valid day
/// of the target month (Jan 31 -> Feb 28/29) instead of rolling over. Week
/// mode moves by exactly seven days. Out-of-range shifts at the edges of
/// the representable calendar leave the anchor unchanged.
pub fn navigate(anchor: NaiveDate, mode: ViewMode, direction: Direction) -> NaiveDate {
    let shifted = match (mode, direction) {
        (ViewMode::Month, Direction::Prev) => anchor.checked_sub_months(Months::new(1)),
        (ViewMode::Month, Direction::Next) => anchor.checked_add_months(Months::new(1)),
        (ViewMode::Week, Direction::Prev) => anchor.checked_sub_days(Days::new(7)),
        (ViewMode::Week, Direction::Next) => anchor.checked_add_days(Days::new(7)),
    };
    shifted.unwrap_or(anchor)
}
