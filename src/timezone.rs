//! Helpers for working with the server's configured timezone.

use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// Look up the current UTC offset for a canonical timezone name, e.g.
/// "Pacific/Auckland". Returns `None` if the name is not a known timezone.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// The current calendar date in the given timezone.
///
/// Created transactions and documents are stamped with this date.
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a
/// canonical timezone name.
pub fn current_local_date(local_timezone: &str) -> Result<Date, Error> {
    let Some(local_offset) = get_local_offset(local_timezone) else {
        tracing::error!("Invalid timezone {}", local_timezone);
        return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
    };

    Ok(OffsetDateTime::now_utc().to_offset(local_offset).date())
}

/// The current wall-clock date and time in the given timezone.
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a
/// canonical timezone name.
pub fn current_local_datetime(local_timezone: &str) -> Result<PrimitiveDateTime, Error> {
    let Some(local_offset) = get_local_offset(local_timezone) else {
        tracing::error!("Invalid timezone {}", local_timezone);
        return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
    };

    let now = OffsetDateTime::now_utc().to_offset(local_offset);

    Ok(PrimitiveDateTime::new(now.date(), now.time()))
}

#[cfg(test)]
mod timezone_tests {
    use crate::{
        Error,
        timezone::{current_local_date, get_local_offset},
    };

    #[test]
    fn known_timezone_resolves() {
        assert!(get_local_offset("Pacific/Auckland").is_some());
        assert!(get_local_offset("UTC").is_some());
    }

    #[test]
    fn unknown_timezone_does_not_resolve() {
        assert!(get_local_offset("Middle/Nowhere").is_none());
    }

    #[test]
    fn current_local_date_rejects_unknown_timezone() {
        assert_eq!(
            current_local_date("Middle/Nowhere"),
            Err(Error::InvalidTimezoneError("Middle/Nowhere".to_owned()))
        );
    }
}
