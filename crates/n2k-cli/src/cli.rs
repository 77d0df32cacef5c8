use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use n2k_store::BackendKind;

#[derive(Parser)]
#[command(
    name = "n2k",
    about = "Avatar name/key resolver backed by an embedded key-value store",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (TOML); flags override file values.
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// Storage engine [sled | redb | rocksdb].
    #[arg(long, global = true)]
    pub database: Option<BackendKind>,

    /// Directory where database files are stored.
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// Keep the store in memory only (sled backend).
    #[arg(long, global = true)]
    pub memory: bool,

    /// Bulk-load this export before running the selected command.
    #[arg(short, long, global = true)]
    pub import: Option<PathBuf>,

    /// Entries written per import batch before a commit.
    #[arg(short = 'b', long, global = true)]
    pub batch_block: Option<usize>,

    /// Logging level [error | warn | info | debug | trace].
    #[arg(short = 'd', long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP resolver service
    Serve(ServeArgs),
    /// Bulk-load a CSV export (plain, gzip, or bzip2) into the store
    Import(ImportArgs),
    /// Resolve a single avatar name or key
    Lookup(LookupArgs),
    /// Interactive resolve loop
    Shell(ShellArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Listen port.
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// The export file to load.
    pub file: PathBuf,
    /// Grid label stamped on imported records.
    #[arg(long)]
    pub grid: Option<String>,
}

#[derive(Args)]
pub struct LookupArgs {
    /// Avatar name or 36-character key.
    pub input: String,
}

#[derive(Args)]
pub struct ShellArgs {}
