use crate::cli::Cli;
use crate::domain::models::{ArchiveOutcome, DuplicateGroup, Note, RunReport};
use crate::services::audit::audit;
use crate::services::config::Config;
use crate::services::dedupe::group_duplicates;
use crate::services::output::print_one;
use crate::services::project::{project, FieldMap};
use crate::services::render::{group_lines, short_date};
use crate::services::retire::retire_group;
use crate::services::source::fetch_all;
use crate::store::DocumentStore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Preview,
    Interactive,
    Unattended,
}

impl Mode {
    /// `--dry-run` wins over `--auto`: previewing is always safe.
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.dry_run {
            Mode::Preview
        } else if cli.auto {
            Mode::Unattended
        } else {
            Mode::Interactive
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum RunOutcome {
    NoDuplicates,
    PreviewRendered,
    Aborted,
    Retired { archived: usize, failed: usize },
}

/// One dedup run: fetch everything, project, group, then either render the
/// plan or archive the remove candidates. All reads complete before any
/// write is attempted. The confirmation gate is injected so the three modes
/// stay pure mode selection over the same analysis pipeline.
pub fn execute(
    cli: &Cli,
    config: &Config,
    collection: &str,
    store: &dyn DocumentStore,
    confirm: &mut dyn FnMut(&str) -> bool,
) -> anyhow::Result<RunOutcome> {
    let mode = Mode::from_cli(cli);
    let fields = FieldMap::new(&config.title_property, &config.body_property);

    if !cli.json {
        println!("scanning collection {}", collection);
    }
    let raw = fetch_all(store, collection)?;
    let notes: Vec<Note> = raw.iter().map(|r| project(r, &fields)).collect();
    let groups = group_duplicates(&notes);
    let scheduled: usize = groups.iter().map(|g| g.remove.len()).sum();
    audit(
        "scan",
        serde_json::json!({
            "collection": collection,
            "records": notes.len(),
            "duplicate_groups": groups.len()
        }),
    );

    if !cli.json {
        println!("found {} records", notes.len());
    }

    if groups.is_empty() {
        let report = RunReport::new("no_duplicates", notes.len(), &groups, vec![]);
        print_one(cli.json, report, |_| {
            "no duplicate records found".to_string()
        })?;
        return Ok(RunOutcome::NoDuplicates);
    }

    if !cli.json {
        println!(
            "found {} duplicate groups ({} records to archive)",
            groups.len(),
            scheduled
        );
        for group in &groups {
            for line in group_lines(group) {
                println!("{}", line);
            }
        }
    }

    match mode {
        Mode::Preview => {
            audit("preview", serde_json::json!({ "scheduled": scheduled }));
            let report = RunReport::new("preview", notes.len(), &groups, vec![]);
            print_one(cli.json, report, |r| {
                format!(
                    "[dry-run] {} records would be archived; no changes made",
                    r.scheduled
                )
            })?;
            Ok(RunOutcome::PreviewRendered)
        }
        Mode::Interactive => {
            let prompt = format!("archive {} duplicate records? (y/N): ", scheduled);
            if !confirm(&prompt) {
                audit("abort", serde_json::json!({ "scheduled": scheduled }));
                let report = RunReport::new("aborted", notes.len(), &groups, vec![]);
                print_one(cli.json, report, |_| {
                    "aborted; no changes made".to_string()
                })?;
                return Ok(RunOutcome::Aborted);
            }
            retire_and_report(cli, notes.len(), &groups, store)
        }
        Mode::Unattended => retire_and_report(cli, notes.len(), &groups, store),
    }
}

fn retire_and_report(
    cli: &Cli,
    scanned: usize,
    groups: &[DuplicateGroup],
    store: &dyn DocumentStore,
) -> anyhow::Result<RunOutcome> {
    let mut outcomes: Vec<ArchiveOutcome> = Vec::new();
    for group in groups {
        for outcome in retire_group(store, group) {
            if !cli.json {
                match &outcome.error {
                    None => println!(
                        "archived: {} ({})",
                        outcome.note.title,
                        short_date(&outcome.note.created_time)
                    ),
                    Some(e) => println!("archive failed: {} - {}", outcome.note.title, e),
                }
            }
            outcomes.push(outcome);
        }
    }
    let archived = outcomes.iter().filter(|o| o.ok).count();
    let failed = outcomes.len().saturating_sub(archived);
    audit(
        "archive",
        serde_json::json!({ "archived": archived, "failed": failed }),
    );
    let report = RunReport::new("retired", scanned, groups, outcomes);
    print_one(cli.json, report, |r| {
        format!("done: archived {}, failed {}", r.archived, r.failed)
    })?;
    Ok(RunOutcome::Retired { archived, failed })
}
