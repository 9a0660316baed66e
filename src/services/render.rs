use crate::domain::models::DuplicateGroup;

const PREVIEW_CHARS: usize = 30;

/// Date prefix of an ISO-8601 timestamp, the full string if it is shorter.
pub fn short_date(ts: &str) -> &str {
    ts.get(..10).unwrap_or(ts)
}

/// First characters of the body for the group listing; `(empty)` when the
/// record has no body at all.
pub fn body_preview(body: &str) -> String {
    if body.is_empty() {
        return "(empty)".to_string();
    }
    let truncated: String = body.chars().take(PREVIEW_CHARS).collect();
    if body.chars().count() > PREVIEW_CHARS {
        format!("{}...", truncated)
    } else {
        truncated
    }
}

pub fn group_lines(group: &DuplicateGroup) -> Vec<String> {
    let mut lines = vec![format!(
        "group: {} ({} records)",
        group.title,
        group.remove.len() + 1
    )];
    lines.push(format!(
        "  keep    {}  {}",
        short_date(&group.keep.created_time),
        body_preview(&group.keep.body)
    ));
    for note in &group.remove {
        lines.push(format!(
            "  remove  {}  {}",
            short_date(&note.created_time),
            body_preview(&note.body)
        ));
    }
    lines
}
