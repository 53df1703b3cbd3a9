// src/process/date_parser.rs

use chrono::NaiveDate;

/// Fast parse of a `"YYYY-MM-DD"` or `"YYYY/MM/DD"` prefix → (year, month).
/// Anything after the day (e.g. a time of day) is ignored.
pub fn parse_year_month(s: &str) -> Option<(i32, u32)> {
    let s = s.trim();
    // minimal length + separators check
    if s.len() < 10 {
        return None;
    }
    let sep = &s[4..5];
    if (sep != "-" && sep != "/") || &s[7..8] != sep {
        return None;
    }
    let year: i32 = s[0..4].parse().ok()?;
    let month: u32 = s[5..7].parse().ok()?;
    let day: u32 = s[8..10].parse().ok()?;

    // reject calendar-impossible dates like 2015-02-30
    NaiveDate::from_ymd_opt(year, month, day)?;
    Some((year, month))
}
