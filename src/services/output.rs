use crate::domain::models::JsonOut;
use serde::Serialize;

/// Render one result value: the `{ok, data}` envelope under `--json`, the
/// given row otherwise.
pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}
