use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "notesweep",
    version,
    about = "Archive duplicate records in a synced notes collection"
)]
pub struct Cli {
    #[arg(long, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, help = "Analyze and render the plan without archiving anything")]
    pub dry_run: bool,
    #[arg(long, help = "Archive without interactive confirmation")]
    pub auto: bool,
    #[arg(long, help = "Collection id to deduplicate (overrides config.toml)")]
    pub collection: Option<String>,
}
