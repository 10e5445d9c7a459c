use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use mongodb::bson::{self, Bson, Document};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

/// A store limit of zero means "no limit", so the smallest accepted value is 1.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListParams {
    #[validate(range(min = 1, message = "limit must be a positive integer"))]
    pub limit: Option<i64>,
}

impl ListParams {
    pub fn limit_or(&self, default: i64) -> i64 {
        self.limit.unwrap_or(default)
    }
}

#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub items: Vec<Value>,
}

impl From<Vec<Document>> for ItemsResponse {
    fn from(docs: Vec<Document>) -> Self {
        Self {
            items: docs.into_iter().map(document_to_json).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
    pub ok: bool,
}

impl CreatedResponse {
    pub fn new(id: String) -> Self {
        Self { id, ok: true }
    }
}

/// Convert a stored document into plain JSON. Object ids become hex
/// strings and datetimes become RFC 3339 text at every nesting level, so no
/// BSON-specific type reaches the client.
pub fn document_to_json(doc: Document) -> Value {
    Value::Object(
        doc.into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => Value::String(format_timestamp(dt)),
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(values) => Value::Array(values.into_iter().map(bson_to_json).collect()),
        // Non-finite doubles have no JSON form
        Bson::Double(v) => serde_json::Number::from_f64(v)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Bson::Int32(v) => Value::from(v),
        Bson::Int64(v) => Value::from(v),
        Bson::String(s) => Value::String(s),
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Null => Value::Null,
        other => other.into_relaxed_extjson(),
    }
}

pub fn format_timestamp(dt: bson::DateTime) -> String {
    dt.to_chrono().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` timestamp (read as
/// UTC) or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid datetime `{}`", value))
}

pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};
    use serde_json::json;

    #[test]
    fn parses_naive_timestamp_as_utc() {
        let dt = parse_timestamp("2024-01-01T00:00:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn parses_offset_timestamp_into_utc() {
        let dt = parse_timestamp("2024-03-10T12:30:00+02:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-10T10:30:00+00:00");
    }

    #[test]
    fn parses_bare_date_as_midnight() {
        let dt = parse_timestamp("2024-02-29").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-02-29T00:00:00+00:00");
    }

    #[test]
    fn rejects_garbage_timestamp() {
        assert!(parse_timestamp("yesterday").is_err());
        assert!(parse_timestamp("2024-13-01").is_err());
    }

    #[test]
    fn stringifies_ids_and_timestamps_recursively() {
        let oid = ObjectId::new();
        let created = bson::DateTime::from_millis(1_704_067_200_000);
        let doc = doc! {
            "_id": oid,
            "amount": 12.5,
            "created_at": created,
            "history": [ { "at": created } ],
            "meta": { "source_id": oid },
        };

        let value = document_to_json(doc);

        assert_eq!(value["_id"], json!(oid.to_hex()));
        assert_eq!(value["amount"], json!(12.5));
        assert_eq!(value["created_at"], json!("2024-01-01T00:00:00.000Z"));
        assert_eq!(value["history"][0]["at"], json!("2024-01-01T00:00:00.000Z"));
        assert_eq!(value["meta"]["source_id"], json!(oid.to_hex()));
    }

    #[test]
    fn list_limit_falls_back_to_default() {
        let params = ListParams::default();
        assert_eq!(params.limit_or(100), 100);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn list_limit_outside_range_is_invalid() {
        assert!(ListParams { limit: Some(0) }.validate().is_err());
        assert!(ListParams { limit: Some(1001) }.validate().is_err());
        assert!(ListParams { limit: Some(25) }.validate().is_ok());
    }
}
