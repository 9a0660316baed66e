//! Service layer containing the dedup engine and side-effect helpers.
//!
//! ## Service map
//! - `config.rs` — config.toml loading, token/collection resolution.
//! - `source.rs` — paginated retrieval, materialized before any decision.
//! - `project.rs` — raw record → `Note` projection (total, never fails).
//! - `dedupe.rs` — duplicate grouping and keep/remove selection.
//! - `retire.rs` — per-record archival with fault isolation.
//! - `render.rs` — group/preview text formatting.
//! - `audit.rs` — append-only run event log.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod audit;
pub mod config;
pub mod dedupe;
pub mod output;
pub mod project;
pub mod render;
pub mod retire;
pub mod source;
