//! CLI runner - executes the discover or sync mode

use crate::catalog::{discover, Catalog};
use crate::cli::commands::Cli;
use crate::config::TapConfig;
use crate::engine::{JsonLinesSink, SyncEngine, SyncStats};
use crate::error::{Error, Result};
use crate::insights::InsightsFetcher;
use crate::state::State;
use std::io::Write;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run against standard output
    pub async fn run(&self) -> Result<()> {
        self.run_with_writer(std::io::stdout()).await
    }

    /// Run, writing the catalog or Singer messages to `out`
    pub async fn run_with_writer<W: Write>(&self, mut out: W) -> Result<()> {
        let config = self.load_config()?;

        if self.cli.discover {
            return self.discover(&mut out);
        }

        self.sync(config, out).await.map(|_| ())
    }

    /// Load configuration
    fn load_config(&self) -> Result<TapConfig> {
        // Inline config takes precedence
        if let Some(json) = &self.cli.config_json {
            return TapConfig::from_json(json);
        }

        let path = self
            .cli
            .config
            .as_ref()
            .ok_or_else(|| Error::config("Config file not specified (use -c flag)"))?;
        TapConfig::from_file(path)
    }

    /// Load state, if one was given
    fn load_state(&self) -> Result<Option<State>> {
        self.cli.state.as_ref().map(State::from_file).transpose()
    }

    /// Load the catalog, falling back to discovery
    fn load_catalog(&self) -> Result<Catalog> {
        match self.cli.catalog_path() {
            Some(path) => Catalog::from_file(path),
            None => {
                info!("No catalog given, syncing the discovered catalog");
                discover(&self.cli.schemas_dir)
            }
        }
    }

    /// Print the discovered catalog
    fn discover<W: Write>(&self, out: &mut W) -> Result<()> {
        info!(schemas_dir = %self.cli.schemas_dir.display(), "Running discovery");
        let catalog = discover(&self.cli.schemas_dir)?;
        writeln!(out, "{}", catalog.to_json_pretty()?)?;
        out.flush()?;
        Ok(())
    }

    /// Sync the selected streams
    async fn sync<W: Write>(&self, config: TapConfig, out: W) -> Result<SyncStats> {
        let catalog = self.load_catalog()?;
        let state = self.load_state()?;

        let selected = catalog.selected_stream_ids();
        info!(streams = ?selected, "Starting sync");

        let fetcher = InsightsFetcher::new(config)?;
        let mut engine = SyncEngine::new(fetcher);
        let mut sink = JsonLinesSink::new(out);

        engine.sync(&catalog, state.as_ref(), &mut sink).await
    }
}
