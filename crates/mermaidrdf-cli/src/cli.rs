//! Command-line interface for the mermaidrdf utility
//!
//! Translates Mermaid diagrams (or Markdown documents embedding them) into
//! D3FEND triples and renders triple files back into diagrams.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};
use walkdir::WalkDir;

use mermaidrdf::core::logging::init_logging;
use mermaidrdf::ontology::OntologyTables;
use mermaidrdf::plugins::Orchestrator;
use mermaidrdf::{Direction, Graph, ParseReport, RenderConfig, TripleStore};

/// mermaidrdf - Mermaid architecture diagrams as D3FEND triples, and back
#[derive(Parser)]
#[command(name = "mermaidrdf")]
#[command(about = "Translate Mermaid flowcharts into D3FEND RDF triples and render them back")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    /// JSON file replacing the built-in ontology tables
    #[arg(long, global = true)]
    pub ontology: Option<PathBuf>,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Serialization of a triple set
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum GraphFormat {
    /// Line-oriented Turtle statements
    #[default]
    Turtle,
    /// JSON array of triples
    Json,
}

impl GraphFormat {
    /// Format implied by a file extension, Turtle unless `.json`
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => GraphFormat::Json,
            _ => GraphFormat::Turtle,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate diagrams into triples
    Translate {
        /// Diagram, Markdown files or directories of Markdown files (use - for stdin)
        inputs: Vec<PathBuf>,

        /// Output file for the triples (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output serialization
        #[arg(long, value_enum, default_value_t = GraphFormat::Turtle)]
        format: GraphFormat,
    },

    /// Render a triple file as a diagram
    Render {
        /// Input file containing triples (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the diagram (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Input serialization, guessed from the file extension if omitted
        #[arg(long, value_enum)]
        format: Option<GraphFormat>,

        /// Diagram direction (TD, TB, BT, LR, RL)
        #[arg(long, default_value = "LR")]
        direction: Direction,

        /// Label width after which a line break is inserted (0 disables wrapping)
        #[arg(long, default_value_t = 20)]
        wrap_width: usize,
    },

    /// Check diagrams and list skipped lines
    Validate {
        /// Diagram or Markdown files to validate (use - for stdin)
        inputs: Vec<PathBuf>,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Dump the ontology tables as JSON
    Tables {
        /// Output file for the tables (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// A named input document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub content: String,
}

/// Main CLI application
pub struct MermaidRdfApp {
    orchestrator: Orchestrator,
}

impl MermaidRdfApp {
    /// Create a new application instance with the built-in tables
    pub fn new() -> Self {
        Self {
            orchestrator: Orchestrator::new(),
        }
    }

    /// Create an application instance with tables loaded from a JSON file
    pub fn with_ontology(path: &Path) -> Result<Self> {
        let tables = OntologyTables::load(path)
            .with_context(|| format!("Failed to load ontology '{}'", path.display()))?;
        Ok(Self {
            orchestrator: Orchestrator::with_tables(Arc::new(tables)),
        })
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        let level = cli
            .log_level
            .map(|level| level.as_str())
            .or(cli.verbose.then_some("debug"));
        let format = cli.log_format.map(|format| format.as_str());
        if let Err(e) = init_logging(level, format) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("mermaidrdf v{}", env!("CARGO_PKG_VERSION"));
        }

        if let Some(path) = &cli.ontology {
            *self = Self::with_ontology(path)?;
        }

        match cli.command {
            Commands::Translate {
                inputs,
                output,
                format,
            } => self.translate_command(&inputs, output, format, cli.verbose),
            Commands::Render {
                input,
                output,
                format,
                direction,
                wrap_width,
            } => {
                let config = RenderConfig::new(direction).with_wrap_width(wrap_width);
                self.render_command(input, output, format, config, cli.verbose)
            }
            Commands::Validate { inputs, json } => self.validate_command(&inputs, json),
            Commands::Tables { output } => self.tables_command(output),
        }
    }

    /// Handle the translate command
    fn translate_command(
        &self,
        inputs: &[PathBuf],
        output: Option<PathBuf>,
        format: GraphFormat,
        verbose: bool,
    ) -> Result<()> {
        let (graph, report) = self.translate_sources(&self.read_sources(inputs)?)?;

        if verbose {
            eprintln!(
                "Translated {} lines into {} triples ({} skipped)",
                report.lines_parsed,
                graph.len(),
                report.skipped.len()
            );
        }

        let content = match format {
            GraphFormat::Turtle => graph.to_turtle(),
            GraphFormat::Json => serde_json::to_string_pretty(&graph)?,
        };
        self.write_output(output, &content)
    }

    /// Translate every source into one graph
    pub fn translate_sources(&self, sources: &[Source]) -> Result<(Graph, ParseReport)> {
        let mut graph = Graph::new();
        let mut report = ParseReport::default();
        for source in sources {
            debug!(source = %source.name, "Translating source");
            let source_report = self
                .orchestrator
                .translate_into(&source.content, &mut graph)
                .with_context(|| format!("Failed to translate '{}'", source.name))?;
            report.merge(source_report);
        }
        info!(sources = sources.len(), triples = graph.len(), "Translated sources");
        Ok((graph, report))
    }

    /// Handle the render command
    fn render_command(
        &mut self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        format: Option<GraphFormat>,
        config: RenderConfig,
        verbose: bool,
    ) -> Result<()> {
        let format = format
            .or_else(|| input.as_deref().map(GraphFormat::from_path))
            .unwrap_or_default();
        let content = self.read_input(input)?;
        let graph = Self::parse_graph(&content, format)?;

        if verbose {
            eprintln!("Read {} triples", graph.len());
        }

        let orchestrator = std::mem::take(&mut self.orchestrator).with_render_config(config);
        let diagram = orchestrator.render(&graph);
        self.orchestrator = orchestrator;
        self.write_output(output, &diagram?)
    }

    /// Parse a triple file in the given serialization
    pub fn parse_graph(content: &str, format: GraphFormat) -> Result<Graph> {
        match format {
            GraphFormat::Turtle => Ok(Graph::parse_statements(content)?),
            GraphFormat::Json => Ok(serde_json::from_str(content)?),
        }
    }

    /// Handle the validate command
    fn validate_command(&self, inputs: &[PathBuf], json: bool) -> Result<()> {
        let sources = self.read_sources(inputs)?;
        let mut failures = 0;
        let mut results = Vec::new();

        for source in &sources {
            match self.orchestrator.translate(&source.content) {
                Ok((graph, report)) => {
                    if json {
                        results.push(serde_json::json!({
                            "source": source.name,
                            "valid": true,
                            "triples": graph.len(),
                            "lines_parsed": report.lines_parsed,
                            "skipped": report.notable_skips().collect::<Vec<_>>(),
                        }));
                    } else {
                        println!(
                            "✓ {}: {} lines, {} triples",
                            source.name,
                            report.lines_parsed,
                            graph.len()
                        );
                        for skip in report.notable_skips() {
                            println!("  {}", skip.to_error());
                        }
                    }
                }
                Err(e) => {
                    failures += 1;
                    error!(source = %source.name, error = %e, "Invalid diagram");
                    if json {
                        results.push(serde_json::json!({
                            "source": source.name,
                            "valid": false,
                            "error": e.to_string(),
                        }));
                    } else {
                        println!("✗ {}: {}", source.name, e);
                    }
                }
            }
        }

        if json {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }

        if failures > 0 {
            return Err(anyhow!("{} of {} inputs are invalid", failures, sources.len()));
        }
        Ok(())
    }

    /// Handle the tables command
    fn tables_command(&self, output: Option<PathBuf>) -> Result<()> {
        let json = self.orchestrator.tables().to_json()?;
        self.write_output(output, &json)
    }

    /// Read every input, expanding directories to their Markdown files
    ///
    /// No inputs means stdin.
    pub fn read_sources(&self, inputs: &[PathBuf]) -> Result<Vec<Source>> {
        if inputs.is_empty() {
            return Ok(vec![Source {
                name: "-".to_string(),
                content: self.read_input(None)?,
            }]);
        }

        let mut sources = Vec::new();
        for input in inputs {
            if input.is_dir() {
                for path in markdown_files(input) {
                    sources.push(Source {
                        name: path.display().to_string(),
                        content: self.read_input(Some(path))?,
                    });
                }
            } else {
                sources.push(Source {
                    name: input.display().to_string(),
                    content: self.read_input(Some(input.clone()))?,
                });
            }
        }
        Ok(sources)
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        let stdout_content = if content.is_empty() || content.ends_with('\n') {
            content.to_string()
        } else {
            format!("{}\n", content)
        };

        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                print!("{}", stdout_content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }

    /// Get a reference to the orchestrator (for testing)
    #[cfg(test)]
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }
}

impl Default for MermaidRdfApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Markdown files under `dir`, sorted by path
fn markdown_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    files.sort();
    files
}
