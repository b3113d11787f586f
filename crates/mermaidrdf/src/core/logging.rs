//! Logging setup
//!
//! Everything in the crate reports through `tracing`; this module installs the
//! subscriber. Natively that is an `EnvFilter` plus one fmt layer writing to
//! stderr, on `wasm32` it is the browser console through `tracing-wasm`.
//!
//! ```no_run
//! use mermaidrdf::core::logging::init_logging;
//!
//! // MERMAIDRDF_LOG_LEVEL / MERMAIDRDF_LOG_FORMAT, else info and compact
//! init_logging(None, None).unwrap();
//! ```
//!
//! Levels used across the pipeline: `info` at translate and render
//! boundaries, `debug` per statement, `trace` per token, `warn` for skipped
//! directives and grammar failures. `RUST_LOG` accepts full filter
//! directives such as `info,mermaidrdf::plugins::flowchart::tokenizer=trace`.

use anyhow::Result;
use std::str::FromStr;

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Environment variable consulted for the log level.
pub const LOG_LEVEL_ENV: &str = "MERMAIDRDF_LOG_LEVEL";
/// Environment variable consulted for the log format.
pub const LOG_FORMAT_ENV: &str = "MERMAIDRDF_LOG_FORMAT";

const DEFAULT_LEVEL: &str = "info";

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One line per event, no targets
    #[default]
    Compact,
    /// Multi-line with source locations and span activity
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl LogFormat {
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Filter directives and format after applying arguments and environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub directives: String,
    pub format: LogFormat,
}

impl LogSettings {
    /// Arguments win over `MERMAIDRDF_LOG_*`, which win over `RUST_LOG` and the defaults
    pub fn resolve(level: Option<&str>, format: Option<&str>) -> Result<Self, String> {
        let directives = level
            .map(str::to_string)
            .or_else(|| std::env::var(LOG_LEVEL_ENV).ok())
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| DEFAULT_LEVEL.to_string());

        let format = match format
            .map(str::to_string)
            .or_else(|| std::env::var(LOG_FORMAT_ENV).ok())
        {
            Some(name) => name.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self { directives, format })
    }

    /// Unparseable directives fall back to the default level
    #[cfg(not(target_arch = "wasm32"))]
    fn filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn fmt_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = fmt::layer().with_writer(std::io::stderr);
    match format {
        LogFormat::Compact => layer.compact().with_target(false).boxed(),
        LogFormat::Pretty => layer
            .pretty()
            .with_file(true)
            .with_line_number(true)
            .with_span_events(FmtSpan::ACTIVE)
            .boxed(),
        LogFormat::Json => layer
            .json()
            .with_file(true)
            .with_line_number(true)
            .with_span_events(FmtSpan::ACTIVE)
            .boxed(),
    }
}

/// Install the global subscriber
///
/// Fails for an unknown format, or when a subscriber is already installed.
pub fn init_logging(level: Option<&str>, format: Option<&str>) -> Result<()> {
    #[cfg(target_arch = "wasm32")]
    {
        // tracing-wasm has its own level and format handling
        let _ = (level, format);
        tracing_wasm::set_as_global_default_with_config(tracing_wasm::WASMLayerConfig::default());
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let settings = LogSettings::resolve(level, format)
            .map_err(|e| anyhow::anyhow!("Invalid log format: {}", e))?;

        tracing_subscriber::registry()
            .with(settings.filter())
            .with(fmt_layer(settings.format))
            .try_init()?;
        Ok(())
    }
}
