// SPDX-FileCopyrightText: 2026 Koyomi contributors
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{Local, NaiveDate};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use koyomi_core::parse_date_key;

/// Parses a `--date` argument: a canonical `YYYY-MM-DD` day or one of the
/// `today`, `tomorrow` and `yesterday` keywords.
pub fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    let today = Local::now().date_naive();
    match s {
        "today" => Ok(today),
        "tomorrow" => today.succ_opt().ok_or_else(|| "date out of range".to_string()),
        "yesterday" => today.pred_opt().ok_or_else(|| "date out of range".to_string()),
        _ => parse_date_key(s).ok_or_else(|| format!("invalid date '{s}', expected YYYY-MM-DD")),
    }
}

/// Title line for the month grid, e.g. "June 2024".
pub fn month_title(anchor: NaiveDate) -> String {
    anchor.format("%B %Y").to_string()
}

/// Title line for the week grid, e.g. "Jun 9 to Jun 15, 2024".
pub fn week_title(first: NaiveDate, last: NaiveDate) -> String {
    format!("{} to {}", first.format("%b %-d"), last.format("%b %-d, %Y"))
}

/// Shortens `s` to at most `width` display columns, ending in an ellipsis
/// when anything was cut.
pub fn truncate_to_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for g in s.graphemes(true) {
        let w = g.width();
        if used + w > width.saturating_sub(1) {
            break;
        }
        out.push_str(g);
        used += w;
    }
    out.push('…');
    out
}

pub fn unicode_width_of_slice(s: &str, first_n_chars: usize) -> usize {
    if first_n_chars == 0 || s.is_empty() {
        0
    } else if let Some((idx, ch)) = s.char_indices().nth(first_n_chars - 1) {
        let byte_idx = idx + ch.len_utf8();
        s[..byte_idx].width()
    } else {
        s.width()
    }
}

/// Return the byte range of the grapheme cluster at index `g_idx` in `s`.
/// If out of bounds, returns None.
pub fn byte_range_of_grapheme_at(s: &str, g_idx: usize) -> Option<std::ops::Range<usize>> {
    for (i, (byte_start, g)) in s.grapheme_indices(true).enumerate() {
        if i == g_idx {
            let byte_end = byte_start + g.len();
            return Some(byte_start..byte_end);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_arg_canonical() {
        assert_eq!(
            parse_date_arg("2024-06-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
        );
    }

    #[test]
    fn test_parse_date_arg_keywords() {
        let today = Local::now().date_naive();
        assert_eq!(parse_date_arg("today").unwrap(), today);
        assert_eq!(parse_date_arg("tomorrow").unwrap(), today.succ_opt().unwrap());
        assert_eq!(parse_date_arg("yesterday").unwrap(), today.pred_opt().unwrap());
    }

    #[test]
    fn test_parse_date_arg_invalid() {
        assert!(parse_date_arg("06/15/2024").is_err());
        assert!(parse_date_arg("2024-13-01").is_err());
        assert!(parse_date_arg("").is_err());
    }

    #[test]
    fn test_titles() {
        let anchor = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(month_title(anchor), "June 2024");

        let first = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        assert_eq!(week_title(first, anchor), "Jun 9 to Jun 15, 2024");
    }

    #[test]
    fn test_truncate_to_width_short_strings_pass_through() {
        assert_eq!(truncate_to_width("standup", 10), "standup");
        assert_eq!(truncate_to_width("", 4), "");
    }

    #[test]
    fn test_truncate_to_width_cuts_with_ellipsis() {
        assert_eq!(truncate_to_width("team retrospective", 9), "team ret…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_truncate_to_width_counts_wide_characters() {
        // each CJK glyph takes two columns
        let s = "会議メモ";
        let cut = truncate_to_width(s, 5);
        assert!(cut.ends_with('…'));
        assert!(cut.width() <= 5);
    }

    #[test]
    fn test_unicode_width_of_slice() {
        assert_eq!(unicode_width_of_slice("hello", 3), 3);
        assert_eq!(unicode_width_of_slice("hello", 0), 0);
        assert_eq!(unicode_width_of_slice("hello", 100), 5);
        assert_eq!(unicode_width_of_slice("a中b", 2), "a中".width());
    }

    #[test]
    fn test_byte_range_of_grapheme_at() {
        assert_eq!(byte_range_of_grapheme_at("hello", 0), Some(0..1));
        assert_eq!(byte_range_of_grapheme_at("a中b", 1), Some(1..4));
        assert_eq!(byte_range_of_grapheme_at("hi", 5), None);
        assert_eq!(byte_range_of_grapheme_at("", 0), None);
    }
}
