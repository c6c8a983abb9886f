use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use url::Url;

/// Parse an ISO8601 / RFC3339 timestamp, a `YYYY-MM-DD HH:MM:SS` UTC time or a bare date.
pub fn parse_iso8601_date(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();
    if date_str.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&dt));
    }

    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
}

pub fn parse_unix_timestamp(secs: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0).single()
}

/// Parse ISO8601 duration string (P1DT1H2M3S) to total seconds.
pub fn parse_iso8601_duration_to_seconds(duration_str: &str) -> Option<u64> {
    let duration_part = duration_str.trim().strip_prefix('P')?;

    let mut total_seconds = 0.0;
    let mut current_number = String::new();
    let mut in_time = false;
    let mut seen_unit = false;

    for ch in duration_part.chars() {
        if ch.is_ascii_digit() || ch == '.' {
            current_number.push(ch);
            continue;
        }
        if ch == 'T' {
            in_time = true;
            continue;
        }

        let num = current_number.parse::<f64>().ok()?;
        total_seconds += match (ch, in_time) {
            ('W', false) => num * 604_800.0,
            ('D', false) => num * 86_400.0,
            ('H', true) => num * 3600.0,
            ('M', true) => num * 60.0,
            ('S', true) => num,
            // years and months have no fixed length
            _ => return None,
        };
        seen_unit = true;
        current_number.clear();
    }

    if !seen_unit || !current_number.is_empty() {
        return None;
    }

    Some(total_seconds as u64)
}

/// Counts arrive as JSON strings from YouTube and as numbers elsewhere.
pub fn parse_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.replace(',', "").trim().parse().ok(),
        _ => None,
    }
}

pub fn string_field(value: &Value) -> Option<String> {
    value.as_str().map(String::from)
}

/// Like `string_field`, but an empty string counts as absent.
pub fn non_empty_field(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(String::from)
}

pub fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, v)| k == key && !v.is_empty())
        .map(|(_, v)| v.into_owned())
}

/// Parses user input, tolerating a missing scheme (`youtu.be/xyz`).
pub fn parse_url(input: &str) -> Option<Url> {
    let input = input.trim();
    Url::parse(input)
        .ok()
        .filter(|u| u.host_str().is_some())
        .or_else(|| {
            let trimmed = input.trim_start_matches('/');
            Url::parse(&format!("https://{trimmed}")).ok()
        })
}

/// True when `host` is `domain` or one of its subdomains.
pub fn host_matches(url: &Url, domain: &str) -> bool {
    url.host_str()
        .map(|host| {
            let host = host.to_ascii_lowercase();
            host == domain || host.ends_with(&format!(".{domain}"))
        })
        .unwrap_or(false)
}
