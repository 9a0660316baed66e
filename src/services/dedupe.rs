use crate::domain::models::{DuplicateGroup, Note};
use std::collections::HashMap;

/// Partition notes by title and keep only the titles that occur more than
/// once. For each such group the record with the lexicographically greatest
/// `created_time` stays active (first seen wins on ties); the rest are
/// scheduled for archival in their original order. Groups come out in the
/// order their title was first encountered, so previews and tests are
/// reproducible.
pub fn group_duplicates(notes: &[Note]) -> Vec<DuplicateGroup> {
    let mut order: Vec<&str> = Vec::new();
    let mut by_title: HashMap<&str, Vec<&Note>> = HashMap::new();
    for note in notes {
        if note.title.is_empty() {
            continue;
        }
        by_title
            .entry(note.title.as_str())
            .or_insert_with(|| {
                order.push(note.title.as_str());
                Vec::new()
            })
            .push(note);
    }

    let mut groups = Vec::new();
    for title in order {
        let members = &by_title[title];
        if members.len() < 2 {
            continue;
        }
        let mut keep = 0;
        for (i, note) in members.iter().enumerate().skip(1) {
            // strictly greater, so the first-seen record wins ties
            if note.created_time > members[keep].created_time {
                keep = i;
            }
        }
        groups.push(DuplicateGroup {
            title: title.to_string(),
            keep: members[keep].clone(),
            remove: members
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != keep)
                .map(|(_, note)| (*note).clone())
                .collect(),
        });
    }
    groups
}
