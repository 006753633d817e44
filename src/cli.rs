use anyhow::{Context as _, Result};
use bikeshare::config::AppConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bikeshare", about = "Explore US bikeshare trip data")]
pub struct Cli {
    /// Directory containing chicago.csv, new_york_city.csv and washington.csv
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Rows shown per page when browsing raw data
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub page_size: Option<u16>,
}

impl Cli {
    /// Load the config file and apply command-line overrides.
    pub fn resolve_config(&self) -> Result<AppConfig> {
        let mut config =
            AppConfig::load(self.config.as_deref()).context("Failed to load configuration")?;

        if let Some(dir) = &self.data_dir {
            config.data_dir.clone_from(dir);
        }
        if let Some(size) = self.page_size {
            config.page_size = usize::from(size);
        }

        Ok(config)
    }
}
