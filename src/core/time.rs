use time::{format_description::FormatItem, macros::format_description, OffsetDateTime, UtcOffset};

use crate::error::Result;
use crate::services::lang::{StringArgs, StringCatalog, CORE_COMPONENT};

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;
const SECS_PER_YEAR: i64 = 365 * SECS_PER_DAY;

/// `Thursday, 2 January 2025, 9:05 AM`
const USER_DATE_FORMAT: &[FormatItem<'static>] = format_description!(
    "[weekday], [day padding:none] [month repr:long] [year], [hour repr:12 padding:none]:[minute] [period]"
);

/// Formats `value` in the viewer's timezone using the long day-and-time layout.
pub fn format_user_date(value: OffsetDateTime, offset: UtcOffset) -> String {
    let local = value.to_offset(offset);
    local.format(USER_DATE_FORMAT).unwrap_or_else(|_| local.to_string())
}

/// Human readable length of `total_seconds`, using the two most significant
/// non-zero units (`1 hour 5 mins`, `3 days 2 hours`). Zero reads as `now`.
pub fn format_duration(catalog: &dyn StringCatalog, total_seconds: i64) -> Result<String> {
    let mut remaining = total_seconds.abs();

    let years = remaining / SECS_PER_YEAR;
    remaining -= years * SECS_PER_YEAR;
    let days = remaining / SECS_PER_DAY;
    remaining -= days * SECS_PER_DAY;
    let hours = remaining / SECS_PER_HOUR;
    remaining -= hours * SECS_PER_HOUR;
    let mins = remaining / SECS_PER_MINUTE;
    let secs = remaining - mins * SECS_PER_MINUTE;

    let units = [
        (years, "year", "years"),
        (days, "day", "days"),
        (hours, "hour", "hours"),
        (mins, "min", "mins"),
        (secs, "sec", "secs"),
    ];

    let Some(first) = units.iter().position(|(amount, _, _)| *amount > 0) else {
        return catalog.get_string("now", CORE_COMPONENT, &StringArgs::None);
    };

    let mut parts = Vec::with_capacity(2);
    for (amount, singular, plural) in units.iter().skip(first).take(2) {
        if *amount == 0 {
            continue;
        }
        let key = if *amount == 1 { singular } else { plural };
        let unit = catalog.get_string(key, CORE_COMPONENT, &StringArgs::None)?;
        parts.push(format!("{amount} {unit}"));
    }

    Ok(parts.join(" "))
}
