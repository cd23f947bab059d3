//! Command-line interface for the cartouche utility
//!
//! Resolves the implementation for diagram markup and renders it, with the
//! same configuration layering the library uses.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use cartouche::plugins::Orchestrator;
use cartouche::{Config, FamilyConfig};

/// Cartouche - resolve and render Mermaid-style diagrams
#[derive(Parser)]
#[command(name = "cartouche")]
#[command(about = "Resolve diagram types with configuration-aware detection and render them")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON configuration file merged onto the defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Preferred renderer for a family, e.g. `flowchart=elk` (repeatable)
    #[arg(short, long = "renderer", value_name = "FAMILY=VARIANT", global = true)]
    pub renderers: Vec<String>,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
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

#[derive(Subcommand)]
pub enum Commands {
    /// Print the id of the implementation that claims the input
    Detect {
        /// Input file to analyze (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Render a diagram
    Render {
        /// Input file containing the diagram (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Append the generated stylesheet
        #[arg(long)]
        styles: bool,

        /// Emit the full render output as JSON
        #[arg(long, conflicts_with = "styles")]
        json: bool,
    },

    /// Show registered diagram types in precedence order
    Types {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Build a configuration from a `family=variant` override
pub fn renderer_override(pair: &str) -> Result<Config> {
    let (family, variant) = pair
        .split_once('=')
        .map(|(family, variant)| (family.trim(), variant.trim()))
        .filter(|(family, variant)| !family.is_empty() && !variant.is_empty())
        .ok_or_else(|| anyhow!("invalid renderer override '{pair}' (expected FAMILY=VARIANT)"))?;

    let section = Some(FamilyConfig::with_renderer(variant));
    let config = match family {
        "flowchart" => Config {
            flowchart: section,
            ..Config::default()
        },
        "state" => Config {
            state: section,
            ..Config::default()
        },
        "class" => Config {
            class: section,
            ..Config::default()
        },
        other => bail!("unknown diagram family '{other}' (expected flowchart, state or class)"),
    };
    Ok(config)
}

/// Load the configuration file and apply renderer overrides on top
pub fn load_config(path: Option<&Path>, renderers: &[String]) -> Result<Config> {
    let mut config = match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
            Config::from_json(&json)?
        }
        None => Config::default(),
    };

    for pair in renderers {
        config = config.merge(&renderer_override(pair)?);
    }
    debug!(?config, "Loaded configuration");
    Ok(config)
}

/// Main CLI application
pub struct CartoucheApp {
    orchestrator: Orchestrator,
}

impl CartoucheApp {
    /// Create a new application instance with the default configuration
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Create a new application instance with a site configuration
    pub fn with_config(config: &Config) -> Self {
        Self {
            orchestrator: Orchestrator::with_all_plugins().with_config(config),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(cli: Cli) -> Result<()> {
        let config = load_config(cli.config.as_deref(), &cli.renderers)?;
        let mut app = Self::with_config(&config);

        if cli.verbose {
            eprintln!("Cartouche v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Detect { input } => app.detect_command(input, cli.verbose),
            Commands::Render {
                input,
                output,
                styles,
                json,
            } => app.render_command(input, output, styles, json, cli.verbose),
            Commands::Types { json } => app.types_command(json),
        }
    }

    /// Handle the detect command
    fn detect_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let diagram_type = self.detect(&content)?;
        println!("{diagram_type}");
        Ok(())
    }

    /// Id of the implementation that claims `content`
    pub fn detect(&self, content: &str) -> Result<&'static str> {
        self.orchestrator
            .detect_diagram_type(content, &Config::default())
            .map_err(|e| anyhow!("Could not detect diagram type: {e}"))
    }

    /// Handle the render command
    fn render_command(
        &mut self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        styles: bool,
        json: bool,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;
        let rendered = self.orchestrator.process(&content)?;

        if verbose {
            eprintln!("Rendered {} diagram", rendered.diagram_type);
        }

        let text = if json {
            serde_json::to_string_pretty(&rendered)?
        } else if styles {
            format!("{}\n\n{}", rendered.body, rendered.styles)
        } else {
            rendered.body
        };
        self.write_output(output, &text)
    }

    /// Handle the types command
    fn types_command(&self, json: bool) -> Result<()> {
        print!("{}", self.describe_types(json)?);
        io::stdout().flush()?;
        Ok(())
    }

    /// Registered types as text or JSON
    pub fn describe_types(&self, json: bool) -> Result<String> {
        let registry = self.orchestrator.registry();
        let entries: Vec<(&'static str, &'static str, Vec<&'static str>)> = registry
            .detectors()
            .zip(registry.ids())
            .map(|(detector, id)| {
                let family = registry.get(id).map(|diagram| diagram.family()).unwrap_or("");
                (id, family, detector.patterns())
            })
            .collect();

        if json {
            let types: Vec<_> = entries
                .iter()
                .map(|(id, family, patterns)| {
                    serde_json::json!({
                        "id": id,
                        "family": family,
                        "patterns": patterns,
                    })
                })
                .collect();
            let document = serde_json::json!({
                "diagram_types": types,
                "total": entries.len(),
            });
            return Ok(format!("{}\n", serde_json::to_string_pretty(&document)?));
        }

        let width = entries.iter().map(|(id, ..)| id.len()).max().unwrap_or(0);
        let mut text = String::from("Registered diagram types (first match wins):\n");
        for (id, family, patterns) in &entries {
            text.push_str(&format!("  {id:<width$}  {family:<9} {}\n", patterns.join(", ")));
        }
        text.push_str(&format!("\nTotal: {} diagram types\n", entries.len()));
        Ok(text)
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
        let terminated = if content.is_empty() || content.ends_with('\n') {
            content.to_string()
        } else {
            format!("{content}\n")
        };

        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, terminated).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                print!("{terminated}");
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

impl Default for CartoucheApp {
    fn default() -> Self {
        Self::new()
    }
}
