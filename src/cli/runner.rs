//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, SearchArgs};
use crate::config::{AppConfig, Credential};
use crate::error::{Error, Result};
use crate::output::{
    render_records, save_with_retry, write_bytes, LockNotifier, LockRetryPolicy, LogNotifier,
    PromptNotifier, SpreadsheetConfig,
};
use crate::search::RepoFetcher;
use std::path::PathBuf;
use std::time::{Duration, Instant};
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

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let mut config = self.load_config()?;

        match &self.cli.command {
            Commands::Export {
                search,
                output,
                format,
                lock_retries,
                lock_retry_delay_ms,
                interactive,
            } => {
                apply_search_args(&mut config, search);
                if let Some(path) = output {
                    config.output.path.clone_from(path);
                }
                if let Some(format) = format {
                    config.output.format = *format;
                }
                if let Some(attempts) = lock_retries {
                    config.output.lock_retry.max_attempts = *attempts;
                }
                if let Some(delay) = lock_retry_delay_ms {
                    config.output.lock_retry.delay_ms = *delay;
                }
                config.validate()?;
                self.export(&config, *interactive).await
            }
            Commands::Count { search } => {
                apply_search_args(&mut config, search);
                config.validate()?;
                self.count(&config).await
            }
        }
    }

    /// Load the config file, or defaults when none was given
    fn load_config(&self) -> Result<AppConfig> {
        match &self.cli.config {
            Some(path) => AppConfig::load(path),
            None => Ok(AppConfig::default()),
        }
    }

    /// Fetch every page and write the output file
    async fn export(&self, config: &AppConfig, interactive: bool) -> Result<()> {
        let start = Instant::now();
        let credential = Credential::from_env()?;
        let fetcher = RepoFetcher::new(&config.api, &credential)?;
        let query = config.query();

        info!(query = query.text(), "Searching repositories");
        let result = fetcher.fetch_all(&query).await?;

        let records = result.into_records();
        let spreadsheet = SpreadsheetConfig::new().with_table_name(&config.output.table_name);
        let bytes = render_records(config.output.format, &records, &spreadsheet)?;

        let path = config.output.path.clone();
        let mut policy = LockRetryPolicy::from(&config.output.lock_retry);
        let notifier: Box<dyn LockNotifier> = if interactive {
            // Waiting for Enter replaces the delay.
            policy = LockRetryPolicy::new(policy.max_attempts(), Duration::ZERO);
            Box::new(PromptNotifier)
        } else {
            Box::new(LogNotifier)
        };

        let saved_to = tokio::task::spawn_blocking(move || -> Result<PathBuf> {
            save_with_retry(&path, &policy, notifier.as_ref(), |p| write_bytes(p, &bytes))?;
            Ok(path)
        })
        .await
        .map_err(|e| Error::Other(format!("Save task failed: {e}")))??;

        info!(
            rows = records.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Data saved to {}",
            saved_to.display()
        );
        Ok(())
    }

    /// Run only the discovery request and print the totals
    async fn count(&self, config: &AppConfig) -> Result<()> {
        let credential = Credential::from_env()?;
        let fetcher = RepoFetcher::new(&config.api, &credential)?;
        let query = config.query();

        let discovery = fetcher.discover_total(&query).await?;
        if !discovery.succeeded {
            return Err(Error::Other(
                "Search request failed; see the log for the response".to_string(),
            ));
        }

        let retrievable = discovery.total_count.min(u64::from(query.max_results()));
        println!("Matching repositories: {}", discovery.reported_total);
        println!("Retrievable: {retrievable}");
        Ok(())
    }
}

/// Overlay command-line search options onto the config
fn apply_search_args(config: &mut AppConfig, args: &SearchArgs) {
    if let Some(query) = &args.query {
        config.search.query.clone_from(query);
    }
    if let Some(sort) = args.sort {
        config.search.sort = sort;
    }
    if let Some(order) = args.order {
        config.search.order = order;
    }
    if let Some(per_page) = args.per_page {
        config.search.per_page = per_page;
    }
    if let Some(max_results) = args.max_results {
        config.search.max_results = max_results;
    }
    if let Some(concurrency) = args.concurrency {
        config.api.concurrency = concurrency;
    }
    if let Some(base_url) = &args.base_url {
        config.api.base_url.clone_from(base_url);
    }
}
