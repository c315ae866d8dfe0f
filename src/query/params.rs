//! Query Parameters Module
//!
//! Turns a loosely-typed query string into an immutable filter description
//! and derives the canonical cache key for it.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::source::UpstreamFilter;

// == Limits ==
/// Smallest accepted result limit
pub const MIN_LIMIT: u32 = 1;
/// Largest accepted result limit
pub const MAX_LIMIT: u32 = 50;
/// Limit used when the caller gives none
pub const DEFAULT_LIMIT: u32 = 10;

/// Placeholder for an absent optional field in a cache key.
const ABSENT: &str = "*";

// == Sort Order ==
/// Ordering of results by launch date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// `asc` in any casing is ascending, everything else descending.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("asc") {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Launch Query Parameters ==
/// Filters for one `/launches` request.
///
/// Every field is already normalized: the name is trimmed and lower-cased,
/// the limit is clamped, and the sort order is resolved. Two values that
/// compare equal always produce the same cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LaunchQueryParameters {
    success: Option<bool>,
    upcoming: Option<bool>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
    name_contains: Option<String>,
    limit: u32,
    sort: SortOrder,
}

impl Default for LaunchQueryParameters {
    fn default() -> Self {
        Self {
            success: None,
            upcoming: None,
            from: None,
            to: None,
            name_contains: None,
            limit: DEFAULT_LIMIT,
            sort: SortOrder::default(),
        }
    }
}

impl LaunchQueryParameters {
    // == Parsing ==
    /// Builds parameters from raw query-string pairs.
    ///
    /// Never fails. Keys match case-insensitively and the first occurrence
    /// of a key wins. Values that cannot be parsed leave the field at its
    /// default, and an out-of-range limit is clamped.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut raw: HashMap<String, String> = HashMap::new();
        for (key, value) in pairs {
            raw.entry(key.as_ref().trim().to_ascii_lowercase())
                .or_insert_with(|| value.as_ref().to_string());
        }
        let field = |name: &str| raw.get(name).map(String::as_str);

        let mut params = Self::default();
        params.success = field("success").and_then(parse_bool);
        params.upcoming = field("upcoming").and_then(parse_bool);
        params.from = field("from").and_then(parse_timestamp);
        params.to = field("to").and_then(parse_timestamp);
        params.name_contains = field("name").and_then(normalize_name);
        if let Some(limit) = field("limit").and_then(parse_limit) {
            params.limit = clamp_limit(limit);
        }
        if let Some(sort) = field("sort").filter(|v| !v.trim().is_empty()) {
            params.sort = SortOrder::parse(sort);
        }
        params
    }

    // == Builders ==
    pub fn with_success(mut self, success: bool) -> Self {
        self.success = Some(success);
        self
    }

    pub fn with_upcoming(mut self, upcoming: bool) -> Self {
        self.upcoming = Some(upcoming);
        self
    }

    pub fn with_from(mut self, from: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_to(mut self, to: DateTime<Utc>) -> Self {
        self.to = Some(to);
        self
    }

    /// Sets the name filter; blank input clears it.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name_contains = normalize_name(name);
        self
    }

    /// Sets the limit, clamped to `[MIN_LIMIT, MAX_LIMIT]`.
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = clamp_limit(limit);
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    // == Accessors ==
    pub fn success(&self) -> Option<bool> {
        self.success
    }

    pub fn upcoming(&self) -> Option<bool> {
        self.upcoming
    }

    pub fn from_date(&self) -> Option<DateTime<Utc>> {
        self.from
    }

    pub fn to_date(&self) -> Option<DateTime<Utc>> {
        self.to
    }

    /// Lower-cased, trimmed name fragment
    pub fn name_contains(&self) -> Option<&str> {
        self.name_contains.as_deref()
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    // == Cache Key ==
    /// Canonical key for these parameters.
    ///
    /// Fields appear in a fixed order as `name=value` pairs joined by `|`,
    /// with `*` standing for an absent filter. The key depends only on the
    /// field values, so it is stable across processes.
    pub fn to_cache_key(&self) -> String {
        format!(
            "success={}|upcoming={}|from={}|to={}|name={}|limit={}|sort={}",
            key_bool(self.success),
            key_bool(self.upcoming),
            key_time(self.from),
            key_time(self.to),
            self.name_contains
                .as_deref()
                .map_or_else(|| ABSENT.to_string(), escape_name),
            self.limit,
            self.sort,
        )
    }

    // == Upstream Projection ==
    /// The subset of filters the data provider can apply server-side.
    pub fn upstream_filter(&self) -> UpstreamFilter {
        UpstreamFilter {
            success: self.success,
            upcoming: self.upcoming,
            from: self.from,
            to: self.to,
        }
    }
}

// == Key Formatting ==
pub(crate) fn key_bool(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "true",
        Some(false) => "false",
        None => ABSENT,
    }
}

pub(crate) fn key_time(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(
        || ABSENT.to_string(),
        |t| t.to_rfc3339_opts(SecondsFormat::AutoSi, true),
    )
}

/// Escapes the characters that carry meaning inside a key.
fn escape_name(name: &str) -> String {
    name.replace('%', "%25")
        .replace('|', "%7C")
        .replace('*', "%2A")
}

// == Value Parsing ==
fn parse_bool(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Accepts RFC 3339, a naive date-time (read as UTC) or a bare date
/// (midnight UTC).
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(t.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc())
}

fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// Parses an integer limit. Digit strings too large for `i64` saturate
/// so they still clamp to the nearest bound.
fn parse_limit(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(limit) = raw.parse::<i64>() {
        return Some(limit);
    }
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

fn clamp_limit(limit: i64) -> u32 {
    // Both bounds fit in u32, so the cast cannot truncate
    limit.clamp(i64::from(MIN_LIMIT), i64::from(MAX_LIMIT)) as u32
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn parse(pairs: &[(&str, &str)]) -> LaunchQueryParameters {
        LaunchQueryParameters::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_defaults_when_empty() {
        let params = parse(&[]);
        assert_eq!(params, LaunchQueryParameters::default());
        assert_eq!(params.limit(), DEFAULT_LIMIT);
        assert_eq!(params.sort(), SortOrder::Desc);
        assert_eq!(
            params.to_cache_key(),
            "success=*|upcoming=*|from=*|to=*|name=*|limit=10|sort=desc"
        );
    }

    #[test]
    fn test_full_parse() {
        let params = parse(&[
            ("success", "true"),
            ("upcoming", "False"),
            ("from", "2020-01-01"),
            ("to", "2020-12-31T23:59:59Z"),
            ("name", "  Falcon 9 "),
            ("limit", "5"),
            ("sort", "ASC"),
        ]);

        assert_eq!(params.success(), Some(true));
        assert_eq!(params.upcoming(), Some(false));
        assert_eq!(
            params.from_date(),
            Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            params.to_date(),
            Some(Utc.with_ymd_and_hms(2020, 12, 31, 23, 59, 59).unwrap())
        );
        assert_eq!(params.name_contains(), Some("falcon 9"));
        assert_eq!(params.limit(), 5);
        assert_eq!(params.sort(), SortOrder::Asc);
        assert_eq!(
            params.to_cache_key(),
            "success=true|upcoming=false|from=2020-01-01T00:00:00Z|to=2020-12-31T23:59:59Z|name=falcon 9|limit=5|sort=asc"
        );
    }

    #[test]
    fn test_malformed_input_degrades_to_defaults() {
        let params = parse(&[
            ("success", "yes"),
            ("upcoming", "1"),
            ("from", "last tuesday"),
            ("to", "2020-13-45"),
            ("name", "   "),
            ("limit", "ten"),
            ("sort", "sideways"),
        ]);

        assert_eq!(params.success(), None);
        assert_eq!(params.upcoming(), None);
        assert_eq!(params.from_date(), None);
        assert_eq!(params.to_date(), None);
        assert_eq!(params.name_contains(), None);
        assert_eq!(params.limit(), DEFAULT_LIMIT);
        assert_eq!(params.sort(), SortOrder::Desc);
    }

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(parse(&[("limit", "0")]).limit(), 1);
        assert_eq!(parse(&[("limit", "-7")]).limit(), 1);
        assert_eq!(parse(&[("limit", "51")]).limit(), 50);
        assert_eq!(parse(&[("limit", "99999999999")]).limit(), 50);
        assert_eq!(parse(&[("limit", " 25 ")]).limit(), 25);
    }

    #[test]
    fn test_overflowing_limit_saturates() {
        assert_eq!(parse(&[("limit", "99999999999999999999999")]).limit(), MAX_LIMIT);
        assert_eq!(parse(&[("limit", "-99999999999999999999999")]).limit(), MIN_LIMIT);
        assert_eq!(parse(&[("limit", "9".repeat(40).as_str())]).limit(), MAX_LIMIT);
        assert_eq!(parse(&[("limit", "12x")]).limit(), DEFAULT_LIMIT);
        assert_eq!(parse(&[("limit", "-")]).limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn test_timestamp_formats() {
        let noon = Utc.with_ymd_and_hms(2021, 3, 4, 12, 0, 0).unwrap();

        assert_eq!(parse(&[("from", "2021-03-04T12:00:00")]).from_date(), Some(noon));
        assert_eq!(parse(&[("from", "2021-03-04 12:00:00")]).from_date(), Some(noon));
        assert_eq!(parse(&[("from", "2021-03-04T12:00")]).from_date(), Some(noon));
        assert_eq!(parse(&[("from", "2021-03-04T14:00:00+02:00")]).from_date(), Some(noon));
    }

    #[test]
    fn test_equivalent_timestamps_share_key() {
        let a = parse(&[("from", "2021-03-04T14:00:00+02:00")]);
        let b = parse(&[("from", "2021-03-04T12:00:00Z")]);
        assert_eq!(a.to_cache_key(), b.to_cache_key());
    }

    #[test]
    fn test_key_casing_and_order_do_not_matter() {
        let a = parse(&[("Name", "FALCON"), ("LIMIT", "3"), ("sort", "asc")]);
        let b = parse(&[("sort", "Asc"), ("limit", "3"), ("name", "falcon")]);
        assert_eq!(a, b);
        assert_eq!(a.to_cache_key(), b.to_cache_key());
    }

    #[test]
    fn test_first_occurrence_wins() {
        let params = parse(&[("limit", "3"), ("LIMIT", "7"), ("limit", "9")]);
        assert_eq!(params.limit(), 3);
    }

    #[test]
    fn test_blank_sort_keeps_default() {
        assert_eq!(parse(&[("sort", "")]).sort(), SortOrder::Desc);
    }

    #[test]
    fn test_name_escaping_keeps_keys_distinct() {
        let tricky = LaunchQueryParameters::default().with_name("x|limit=5");
        let plain = LaunchQueryParameters::default().with_name("x").with_limit(5);
        assert_ne!(tricky.to_cache_key(), plain.to_cache_key());

        let star = LaunchQueryParameters::default().with_name("*");
        let absent = LaunchQueryParameters::default();
        assert_ne!(star.to_cache_key(), absent.to_cache_key());
        assert!(star.to_cache_key().contains("name=%2A"));
    }

    #[test]
    fn test_builders_normalize() {
        let params = LaunchQueryParameters::default()
            .with_name("  Starlink ")
            .with_limit(500);
        assert_eq!(params.name_contains(), Some("starlink"));
        assert_eq!(params.limit(), MAX_LIMIT);

        assert_eq!(LaunchQueryParameters::default().with_name(" ").name_contains(), None);
    }

    #[test]
    fn test_upstream_filter_projection() {
        let from = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
        let params = LaunchQueryParameters::default()
            .with_success(true)
            .with_from(from)
            .with_name("crew")
            .with_limit(3);

        let filter = params.upstream_filter();
        assert_eq!(filter.success, Some(true));
        assert_eq!(filter.upcoming, None);
        assert_eq!(filter.from, Some(from));
        assert_eq!(filter.to, None);
    }
}
