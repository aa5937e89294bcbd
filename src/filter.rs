// src/filter.rs

//! Temporal pin filter: parses the optional `date` / `month` / `year` /
//! `start` / `end` query parameters into a request-scoped predicate over the
//! pin creation timestamp.
//!
//! Supported formats:
//! - `date`  → YYYY-MM-DD (exact day)
//! - `month` → YYYY-MM
//! - `year`  → YYYY (exactly 4 digits)
//! - `start` / `end` → YYYY-MM-DD, inclusive, each bound independent
//!
//! Every supplied parameter is validated on its own; one bad value fails the
//! whole request. Valid criteria combine with logical AND.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::errors::{AppError, AppResult};

/// Raw query parameters, exactly as they arrive at the boundary.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FilterParams {
    pub date: Option<String>,
    pub month: Option<String>,
    pub year: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Parsed, validated filter. Holds nothing but the criteria themselves, so a
/// value never outlives its request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PinFilter {
    date: Option<NaiveDate>,
    month: Option<(i32, u32)>,
    year: Option<i32>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl PinFilter {
    /// Validate and combine the supplied parameters.
    pub fn parse(params: &FilterParams) -> AppResult<Self> {
        let mut filter = PinFilter::default();

        if let Some(raw) = &params.date {
            filter.date = Some(parse_day(raw, "date")?);
        }
        if let Some(raw) = &params.month {
            filter.month = Some(parse_month(raw)?);
        }
        if let Some(raw) = &params.year {
            filter.year = Some(parse_year(raw)?);
        }
        if let Some(raw) = &params.start {
            filter.start = Some(parse_day(raw, "start")?);
        }
        if let Some(raw) = &params.end {
            filter.end = Some(parse_day(raw, "end")?);
        }

        Ok(filter)
    }

    /// True when no criterion was supplied (predicate matches every pin).
    pub fn is_empty(&self) -> bool {
        *self == PinFilter::default()
    }

    /// AND of every supplied criterion against a creation timestamp.
    pub fn matches(&self, created_at: NaiveDateTime) -> bool {
        let day = created_at.date();

        if let Some(d) = self.date
            && day != d
        {
            return false;
        }
        if let Some((y, m)) = self.month
            && (day.year() != y || day.month() != m)
        {
            return false;
        }
        if let Some(y) = self.year
            && day.year() != y
        {
            return false;
        }
        if let Some(s) = self.start
            && day < s
        {
            return false;
        }
        if let Some(e) = self.end
            && day > e
        {
            return false;
        }

        true
    }

    /// Collapse the criteria into one inclusive calendar-date interval.
    ///
    /// Every criterion is an interval over the creation date, so their AND is
    /// the intersection; a lower bound above the upper bound simply selects
    /// nothing. `(None, None)` means match-all.
    pub fn date_bounds(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        let mut lower: Option<NaiveDate> = None;
        let mut upper: Option<NaiveDate> = None;

        let mut narrow = |lo: NaiveDate, hi: NaiveDate| {
            lower = Some(lower.map_or(lo, |cur| cur.max(lo)));
            upper = Some(upper.map_or(hi, |cur| cur.min(hi)));
        };

        if let Some(d) = self.date {
            narrow(d, d);
        }
        if let Some((y, m)) = self.month {
            // month_bounds only fails on an out-of-range month, which parse_month rejects
            if let Some((first, last)) = month_bounds(y, m) {
                narrow(first, last);
            }
        }
        if let Some(y) = self.year
            && let (Some(first), Some(last)) = (
                NaiveDate::from_ymd_opt(y, 1, 1),
                NaiveDate::from_ymd_opt(y, 12, 31),
            )
        {
            narrow(first, last);
        }
        if let Some(s) = self.start {
            lower = Some(lower.map_or(s, |cur| cur.max(s)));
        }
        if let Some(e) = self.end {
            upper = Some(upper.map_or(e, |cur| cur.min(e)));
        }

        (lower, upper)
    }

    /// Filename qualifier for exports. When several criteria were supplied
    /// the most specific one names the file; filtering still ANDs them all.
    pub fn qualifier(&self) -> String {
        if let Some(d) = self.date {
            return format!("dia_{}", d.format("%Y-%m-%d"));
        }
        if let Some((y, m)) = self.month {
            return format!("mes_{y:04}-{m:02}");
        }
        if let Some(y) = self.year {
            return format!("anio_{y:04}");
        }
        match (self.start, self.end) {
            (Some(s), Some(e)) => format!("{}_a_{}", s.format("%Y-%m-%d"), e.format("%Y-%m-%d")),
            (Some(s), None) => format!("desde_{}", s.format("%Y-%m-%d")),
            (None, Some(e)) => format!("hasta_{}", e.format("%Y-%m-%d")),
            (None, None) => "todo".to_string(),
        }
    }
}

fn parse_day(raw: &str, field: &'static str) -> AppResult<NaiveDate> {
    if raw.len() != 10 {
        return Err(AppError::InvalidFilter {
            field,
            expected: "YYYY-MM-DD",
        });
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| AppError::InvalidFilter {
        field,
        expected: "YYYY-MM-DD",
    })
}

fn parse_month(raw: &str) -> AppResult<(i32, u32)> {
    let invalid = AppError::InvalidFilter {
        field: "month",
        expected: "YYYY-MM",
    };

    if raw.len() != 7 || raw.as_bytes()[4] != b'-' {
        return Err(invalid);
    }

    let y: i32 = raw[0..4].parse().map_err(|_| AppError::InvalidFilter {
        field: "month",
        expected: "YYYY-MM",
    })?;
    let m: u32 = raw[5..7].parse().map_err(|_| AppError::InvalidFilter {
        field: "month",
        expected: "YYYY-MM",
    })?;

    if month_bounds(y, m).is_none() {
        return Err(invalid);
    }

    Ok((y, m))
}

fn parse_year(raw: &str) -> AppResult<i32> {
    let invalid = AppError::InvalidFilter {
        field: "year",
        expected: "YYYY (4 digits)",
    };

    if raw.len() != 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid);
    }

    raw.parse().map_err(|_| AppError::InvalidFilter {
        field: "year",
        expected: "YYYY (4 digits)",
    })
}

/// First and last day of a calendar month.
fn month_bounds(y: i32, m: u32) -> Option<(NaiveDate, NaiveDate)> {
    let last_day = match m {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            let leap = (y % 4 == 0 && y % 100 != 0) || (y % 400 == 0);
            if leap { 29 } else { 28 }
        }
        _ => return None,
    };

    let first = NaiveDate::from_ymd_opt(y, m, 1)?;
    let last = NaiveDate::from_ymd_opt(y, m, last_day)?;
    Some((first, last))
}
