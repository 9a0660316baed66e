use serde::Serialize;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// Normalized view of one remote record. Everything the engine needs,
/// nothing the wire format leaks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    pub id: String,
    /// Dedup key. Empty means the record never participates in grouping.
    pub title: String,
    pub body: String,
    /// ISO-8601, lexically sortable.
    pub created_time: String,
    pub url: String,
}

/// One duplicated title: the single record that stays active plus the
/// records scheduled for archival, in source order.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateGroup {
    pub title: String,
    pub keep: Note,
    pub remove: Vec<Note>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArchiveOutcome {
    pub note: Note,
    pub ok: bool,
    pub error: Option<String>,
}

/// Terminal summary of one run, also the `--json` payload.
#[derive(Serialize)]
pub struct RunReport {
    pub state: String,
    pub scanned: usize,
    pub duplicate_groups: Vec<DuplicateGroup>,
    pub scheduled: usize,
    pub archived: usize,
    pub failed: usize,
    pub outcomes: Vec<ArchiveOutcome>,
}

impl RunReport {
    pub fn new(
        state: &str,
        scanned: usize,
        groups: &[DuplicateGroup],
        outcomes: Vec<ArchiveOutcome>,
    ) -> Self {
        let scheduled = groups.iter().map(|g| g.remove.len()).sum();
        let archived = outcomes.iter().filter(|o| o.ok).count();
        let failed = outcomes.len().saturating_sub(archived);
        Self {
            state: state.to_string(),
            scanned,
            duplicate_groups: groups.to_vec(),
            scheduled,
            archived,
            failed,
            outcomes,
        }
    }
}
