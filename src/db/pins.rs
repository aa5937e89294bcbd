use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::{Connection, Row, params_from_iter};

use crate::errors::{AppError, AppResult};
use crate::filter::PinFilter;
use crate::models::pin::{CREATED_AT_FORMAT, NewPin, Pin};

/// Query ordering. Listing shows newest pins first; exports keep stable
/// chronological order for spreadsheet review. The difference is deliberate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    NewestFirst,
    OldestFirst,
}

impl SortOrder {
    fn sql(self) -> &'static str {
        match self {
            SortOrder::NewestFirst => " ORDER BY id DESC",
            SortOrder::OldestFirst => " ORDER BY id ASC",
        }
    }
}

/// Insert a pin, stamping `created_at` with the current UTC time at second
/// precision. Returns the stored row.
pub fn insert_pin(conn: &Connection, new: &NewPin) -> AppResult<Pin> {
    let created_at = truncate_to_seconds(Utc::now().naive_utc());

    conn.execute(
        "INSERT INTO pins (title, description, longitude, latitude, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![
            new.title,
            new.description,
            new.longitude,
            new.latitude,
            created_at.format(CREATED_AT_FORMAT).to_string(),
        ],
    )?;

    let id = conn.last_insert_rowid();

    Ok(Pin {
        id,
        title: new.title.clone(),
        description: new.description.clone(),
        longitude: new.longitude,
        latitude: new.latitude,
        created_at,
    })
}

/// Load pins matching the filter, in the requested order. The filter's
/// criteria collapse to one inclusive date interval (see `PinFilter`), so
/// the WHERE clause is at most two bounds on `created_at`.
pub fn load_pins(conn: &Connection, filter: &PinFilter, order: SortOrder) -> AppResult<Vec<Pin>> {
    let (lower, upper) = filter.date_bounds();

    let mut clauses: Vec<String> = Vec::new();
    let mut args: Vec<String> = Vec::new();

    if let Some(lo) = lower {
        args.push(day_floor(lo));
        clauses.push(format!("created_at >= ?{}", args.len()));
    }
    if let Some(hi) = upper {
        args.push(day_ceil(hi));
        clauses.push(format!("created_at <= ?{}", args.len()));
    }

    let mut sql = String::from(
        "SELECT id, title, description, longitude, latitude, created_at FROM pins",
    );
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(order.sql());

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args.iter()), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn map_row(row: &Row) -> rusqlite::Result<Pin> {
    let created_str: String = row.get("created_at")?;

    let created_at =
        NaiveDateTime::parse_from_str(&created_str, CREATED_AT_FORMAT).map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::Other(format!(
                    "Invalid created_at: {created_str}"
                ))),
            )
        })?;

    Ok(Pin {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        longitude: row.get("longitude")?,
        latitude: row.get("latitude")?,
        created_at,
    })
}

// "YYYY-MM-DD HH:MM:SS" compares lexicographically in timestamp order, so
// day bounds become plain string bounds.
fn day_floor(day: NaiveDate) -> String {
    format!("{} 00:00:00", day.format("%Y-%m-%d"))
}

fn day_ceil(day: NaiveDate) -> String {
    format!("{} 23:59:59", day.format("%Y-%m-%d"))
}

/// Truncate to second precision, matching the stored format.
fn truncate_to_seconds(dt: NaiveDateTime) -> NaiveDateTime {
    use chrono::Timelike;
    dt.with_nanosecond(0).unwrap_or(dt)
}
