use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs::File, str::FromStr, sync::Mutex};
use tracing::Level;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt::{self, writer::BoxMakeWriter},
    layer::Layered,
    prelude::*,
    Layer, Registry,
};

type FilteredRegistry = Layered<EnvFilter, Registry>;

/// Defines the format for log messages.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Plain,
}

/// Defines the destination for log output.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    File,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
#[serde(default, rename_all = "kebab-case")]
pub struct LogConfig {
    /// Log level, e.g., "info", "debug", "trace". Unknown values fall back to "info".
    pub level: String,
    pub format: LogFormat,
    pub output: LogOutput,
    /// Path to the log file, required if output is "file".
    pub file_path: Option<String>,
    /// Extra per-target directives such as "mintwatch_connector=debug,solana_rpc_client=warn".
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Plain,
            output: LogOutput::Stdout,
            file_path: None,
            filter: None,
        }
    }
}

impl LogConfig {
    pub fn max_level(&self) -> Level {
        Level::from_str(&self.level).unwrap_or(Level::INFO)
    }

    /// The configured level as the default directive, refined by `filter`.
    ///
    /// Malformed directives in `filter` are ignored.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(self.max_level()).into())
            .parse_lossy(self.filter.as_deref().unwrap_or_default())
    }

    fn writer(&self) -> Result<BoxMakeWriter> {
        match self.output {
            LogOutput::Stdout => Ok(BoxMakeWriter::new(std::io::stdout)),
            LogOutput::File => {
                let path = self
                    .file_path
                    .as_deref()
                    .context("Log output is 'file' but 'file_path' is not specified")?;
                let file = File::create(path)
                    .with_context(|| format!("Failed to create log file '{path}'"))?;
                Ok(BoxMakeWriter::new(Mutex::new(file)))
            }
        }
    }
}

/// Installs the global `tracing` subscriber described by `config`.
///
/// Fails if file output is requested without a path, if the file cannot be
/// created, or if a global subscriber is already installed.
pub fn init(config: &LogConfig) -> Result<()> {
    let writer = config.writer()?;
    let to_terminal = config.output == LogOutput::Stdout;

    let layer: Box<dyn Layer<FilteredRegistry> + Send + Sync> = match config.format {
        LogFormat::Json => fmt::layer().json().with_writer(writer).boxed(),
        LogFormat::Plain if to_terminal => fmt::layer().pretty().with_writer(writer).boxed(),
        LogFormat::Plain => fmt::layer().with_ansi(false).with_writer(writer).boxed(),
    };

    Registry::default()
        .with(config.env_filter())
        .with(layer)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    tracing::debug!(level = %config.max_level(), format = ?config.format, "Logging initialized");
    Ok(())
}
