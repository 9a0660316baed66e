use crate::domain::models::Note;
use crate::store::RawRecord;
use serde_json::Value;

/// Which record properties carry the title and body rich-text. The names
/// are deployment-specific (synced collections localize them), so they come
/// from config rather than being baked in.
#[derive(Debug, Clone)]
pub struct FieldMap {
    pub title: String,
    pub body: String,
}

impl FieldMap {
    pub fn new(title: &str, body: &str) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
        }
    }
}

/// Project a raw record into a `Note`. Total: every field read has a
/// default, so missing or malformed data degrades to empty strings instead
/// of failing the run. A record that ends up with an empty title is simply
/// never grouped.
pub fn project(raw: &RawRecord, fields: &FieldMap) -> Note {
    Note {
        id: str_field(raw, "id"),
        title: segments_text(raw, &fields.title, "title"),
        body: segments_text(raw, &fields.body, "rich_text"),
        created_time: str_field(raw, "created_time"),
        url: str_field(raw, "url"),
    }
}

fn str_field(raw: &RawRecord, key: &str) -> String {
    raw.get(key).and_then(Value::as_str).unwrap_or("").to_string()
}

/// Concatenate the `plain_text` of every rich-text segment under
/// `properties.<property>.<kind>`, trimmed. Anything that is not the
/// expected shape contributes nothing.
fn segments_text(raw: &RawRecord, property: &str, kind: &str) -> String {
    let segments = raw
        .get("properties")
        .and_then(|p| p.get(property))
        .and_then(|p| p.get(kind))
        .and_then(Value::as_array);
    let Some(segments) = segments else {
        return String::new();
    };
    let mut out = String::new();
    for segment in segments {
        if let Some(text) = segment.get("plain_text").and_then(Value::as_str) {
            out.push_str(text);
        }
    }
    out.trim().to_string()
}
