//! CLI arguments

use clap::Parser;
use std::path::PathBuf;

/// Singer tap for Facebook page insights
#[derive(Parser, Debug)]
#[command(name = "tap-fbpageinsights")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Inline config JSON
    #[arg(long)]
    pub config_json: Option<String>,

    /// State file (JSON)
    #[arg(short, long)]
    pub state: Option<PathBuf>,

    /// Catalog file (JSON)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Catalog file, legacy flag name
    #[arg(short, long)]
    pub properties: Option<PathBuf>,

    /// Print the discovered catalog and exit
    #[arg(short, long)]
    pub discover: bool,

    /// Directory holding one JSON schema per stream
    #[arg(long, default_value = "schemas")]
    pub schemas_dir: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Catalog path, `--catalog` winning over `--properties`
    pub fn catalog_path(&self) -> Option<&PathBuf> {
        self.catalog.as_ref().or(self.properties.as_ref())
    }
}
