use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Parses the split `sms_date` + `sms_time` fields of the structured
/// webhook shape ("2024-01-15" + "10:30:45"). The provider reports UTC.
pub fn parse_provider_date_time(date: &str, time: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M:%S").ok()?;
    Some(date.and_time(time).and_utc())
}

/// Parses the single `created_at` timestamp of the legacy webhook shape.
/// Accepts RFC 3339 or the provider's "YYYY-MM-DD HH:MM:SS" form.
pub fn parse_provider_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw.trim()) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_split_date_and_time() {
        let dt = parse_provider_date_time("2024-01-15", "10:30:45").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-15T10:30:45+00:00");
        assert!(parse_provider_date_time("2024-01-15", "bogus").is_none());
        assert!(parse_provider_date_time("15/01/2024", "10:30:45").is_none());
    }

    #[test]
    fn parses_both_timestamp_forms() {
        let flat = parse_provider_timestamp("2024-01-15 10:30:45").unwrap();
        assert_eq!(flat.hour(), 10);
        let rfc = parse_provider_timestamp("2024-01-15T10:30:45Z").unwrap();
        assert_eq!(flat, rfc);
        assert!(parse_provider_timestamp("yesterday").is_none());
    }
}
