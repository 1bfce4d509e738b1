// src/repositories/sql.rs
//
// Column codecs shared by the SQLite repositories.
// Dates are stored as `YYYY-MM-DD`, timestamps as RFC 3339.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use uuid::Uuid;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn conversion_error<E>(err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(err))
}

pub(crate) fn date_to_sql(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn parse_uuid(value: &str) -> Result<Uuid, rusqlite::Error> {
    Uuid::parse_str(value).map_err(conversion_error)
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, rusqlite::Error> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(conversion_error)
}

pub(crate) fn parse_optional_date(value: Option<String>) -> Result<Option<NaiveDate>, rusqlite::Error> {
    value.as_deref().map(parse_date).transpose()
}

pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(conversion_error)
}

pub(crate) fn parse_optional_timestamp(
    value: Option<String>,
) -> Result<Option<DateTime<Utc>>, rusqlite::Error> {
    value.as_deref().map(parse_timestamp).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_codec() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(date_to_sql(date), "2024-02-29");
        assert_eq!(parse_date("2024-02-29").unwrap(), date);
    }

    #[test]
    fn test_bad_values_are_conversion_failures() {
        assert!(matches!(
            parse_date("29/02/2024"),
            Err(rusqlite::Error::FromSqlConversionFailure(..))
        ));
        assert!(parse_uuid("not-a-uuid").is_err());
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_optional_values() {
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert!(parse_optional_timestamp(Some("2024-01-15T10:00:00+00:00".to_string()))
            .unwrap()
            .is_some());
    }
}
