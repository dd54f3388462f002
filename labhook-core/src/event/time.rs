//! Timestamp handling for GitLab payloads.
//!
//! GitLab is not consistent about timestamp spelling. Depending on the event and
//! the version it sends RFC 3339 (`2024-05-02T10:11:12Z`), `2024-05-02 10:11:12 UTC`
//! or `2024-05-02 12:11:12 +0200`. All three decode to `DateTime<Utc>`;
//! serialization always writes RFC 3339.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse any timestamp spelling GitLab uses.
pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Some(naive) = raw.strip_suffix(" UTC") {
        return NaiveDateTime::parse_from_str(naive, "%Y-%m-%d %H:%M:%S").map(|n| n.and_utc());
    }
    DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z").map(|parsed| parsed.with_timezone(&Utc))
}

/// `#[serde(with = "...")]` adapter for optional timestamps.
///
/// `null`, a missing field and an empty string all decode to `None`.
pub(crate) mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub(crate) fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(timestamp) => serializer.serialize_some(&timestamp.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.filter(|raw| !raw.trim().is_empty())
            .map(|raw| super::parse(&raw).map_err(|e| D::Error::custom(format!("invalid timestamp {raw:?}: {e}"))))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_every_gitlab_spelling() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 2, 10, 11, 12).unwrap();
        assert_eq!(parse("2024-05-02T10:11:12Z").unwrap(), expected);
        assert_eq!(parse("2024-05-02T12:11:12+02:00").unwrap(), expected);
        assert_eq!(parse("2024-05-02 10:11:12 UTC").unwrap(), expected);
        assert_eq!(parse("2024-05-02 12:11:12 +0200").unwrap(), expected);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("yesterday").is_err());
        assert!(parse("2024-05-02").is_err());
    }
}
