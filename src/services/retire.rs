use crate::domain::models::{ArchiveOutcome, DuplicateGroup};
use crate::store::DocumentStore;

/// Archive every remove candidate in the group, one blocking call each.
/// Failures are captured per record and never stop the batch: one bad
/// record must not block the rest. Archiving an already-archived record is
/// a store-side no-op, so reruns are safe. No automatic retry.
pub fn retire_group(store: &dyn DocumentStore, group: &DuplicateGroup) -> Vec<ArchiveOutcome> {
    group
        .remove
        .iter()
        .map(|note| match store.archive(&note.id) {
            Ok(()) => ArchiveOutcome {
                note: note.clone(),
                ok: true,
                error: None,
            },
            Err(e) => ArchiveOutcome {
                note: note.clone(),
                ok: false,
                error: Some(e.to_string()),
            },
        })
        .collect()
}
