use crate::store::{DocumentStore, RawRecord};

/// Fetch every record in the collection, threading the continuation cursor
/// until the store reports no more pages.
///
/// The whole collection is materialized before any decision is made:
/// grouping is not a streaming algorithm, since a record on a late page can
/// be any group's keep. A failed page fetch aborts the run; dedup on
/// partial data could archive a record whose newer sibling was never seen.
pub fn fetch_all(store: &dyn DocumentStore, collection: &str) -> anyhow::Result<Vec<RawRecord>> {
    let mut records = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let page = store.query_page(collection, cursor.as_deref())?;
        records.extend(page.results);
        if !page.has_more {
            break;
        }
        // has_more without a cursor would refetch the first page forever
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }
    Ok(records)
}
