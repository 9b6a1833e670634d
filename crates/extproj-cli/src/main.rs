//! CLI entry point for extproj.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `extproj-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use extproj_app::{
    ScanInput, build_registry, describe_project, list_handlers, load_config, project_subgraph,
    render_descriptor_text, render_handlers_text, render_scan_text, run_scan, scan_json,
    to_json_pretty, write_text_file,
};
use extproj_diagnostics::{ContextStack, Diagnostic};
use extproj_handlers::ToolsetContext;
use extproj_settings::{EffectiveConfig, OutputFormat, Overrides};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "EXTPROJ_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "extproj",
    version,
    about = "Describe external Visual Studio project files"
)]
struct Cli {
    /// Path to extproj config TOML.
    #[arg(long, global = true, default_value = "extproj.toml")]
    config: Utf8PathBuf,

    /// Override extension collision policy (first-wins|reject).
    #[arg(long, global = true)]
    on_collision: Option<String>,

    /// Override output format (text|json).
    #[arg(long, global = true)]
    format: Option<String>,

    /// Toolset the projects are described for.
    #[arg(long, global = true, default_value = extproj_app::DEFAULT_TOOLSET)]
    toolset: String,

    /// Increase log verbosity (-v debug, -vv trace). Otherwise `EXTPROJ_LOG` applies.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the version, name and GUID of one project file.
    Describe {
        /// The `.vcproj` or `.vcxproj` file.
        file: Utf8PathBuf,
    },

    /// Describe every recognized project file under a directory.
    Scan {
        /// Directory to walk.
        dir: Utf8PathBuf,

        /// Write the result here instead of stdout.
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Request the build subgraph of one project file.
    Subgraph {
        file: Utf8PathBuf,
    },

    /// List registered handlers and the extensions they own.
    Handlers,

    /// Print the JSON Schema of the config file.
    Schema,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.cmd {
        Commands::Describe { file } => cmd_describe(&cli, file),
        Commands::Scan { dir, output } => cmd_scan(&cli, dir, output.as_deref()),
        Commands::Subgraph { file } => cmd_subgraph(&cli, file),
        Commands::Handlers => cmd_handlers(&cli),
        Commands::Schema => cmd_schema(),
    };

    match result {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("extproj error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_effective_config(cli: &Cli) -> anyhow::Result<EffectiveConfig> {
    // Missing file is allowed (defaults apply).
    let text = if cli.config.exists() {
        std::fs::read_to_string(&cli.config)
            .with_context(|| format!("read config: {}", cli.config))?
    } else {
        tracing::debug!(path = %cli.config, "no config file; using defaults");
        String::new()
    };
    load_config(
        &text,
        Overrides {
            on_collision: cli.on_collision.clone(),
            format: cli.format.clone(),
        },
    )
}

fn report_diagnostic(format: OutputFormat, diag: &Diagnostic) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => eprintln!("{}", diag.render()),
        OutputFormat::Json => print!("{}", to_json_pretty(&diag.to_report())?),
    }
    Ok(())
}

fn cmd_describe(cli: &Cli, file: &Utf8Path) -> anyhow::Result<i32> {
    let config = load_effective_config(cli)?;
    let registry = build_registry(&config)?;
    let toolset = ToolsetContext::new(&cli.toolset);

    let mut stack = ContextStack::new();
    match describe_project(&registry, &mut stack, &toolset, file) {
        Ok(descriptor) => {
            match config.format {
                OutputFormat::Text => print!("{}", render_descriptor_text(&descriptor)),
                OutputFormat::Json => print!("{}", to_json_pretty(&descriptor)?),
            }
            Ok(0)
        }
        Err(diag) => {
            report_diagnostic(config.format, &diag)?;
            Ok(1)
        }
    }
}

fn cmd_scan(cli: &Cli, dir: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<i32> {
    let config = load_effective_config(cli)?;
    let registry = build_registry(&config)?;
    let toolset = ToolsetContext::new(&cli.toolset);

    let out = run_scan(ScanInput {
        root: dir,
        registry: &registry,
        config: &config,
        toolset: &toolset,
    })?;

    let text = match config.format {
        OutputFormat::Text => {
            for entry in &out.entries {
                if let Err(diag) = &entry.result {
                    eprintln!("{}", diag.render());
                }
            }
            render_scan_text(&out)
        }
        OutputFormat::Json => to_json_pretty(&scan_json(&out))?,
    };

    match output {
        Some(path) => write_text_file(path, &text).context("write scan output")?,
        None => print!("{text}"),
    }

    if out.has_failures() {
        eprintln!(
            "extproj: {} of {} project files could not be described",
            out.failed(),
            out.entries.len()
        );
        return Ok(2);
    }
    Ok(0)
}

fn cmd_subgraph(cli: &Cli, file: &Utf8Path) -> anyhow::Result<i32> {
    let config = load_effective_config(cli)?;
    let registry = build_registry(&config)?;
    let toolset = ToolsetContext::new(&cli.toolset);

    let mut stack = ContextStack::new();
    match project_subgraph(&registry, &mut stack, &toolset, file) {
        Ok(subgraph) => {
            print!("{}", to_json_pretty(&subgraph)?);
            Ok(0)
        }
        Err(diag) => {
            report_diagnostic(config.format, &diag)?;
            Ok(1)
        }
    }
}

fn cmd_handlers(cli: &Cli) -> anyhow::Result<i32> {
    let config = load_effective_config(cli)?;
    let registry = build_registry(&config)?;
    let report = list_handlers(&registry);
    match config.format {
        OutputFormat::Text => print!("{}", render_handlers_text(&report)),
        OutputFormat::Json => print!("{}", to_json_pretty(&report)?),
    }
    Ok(0)
}

fn cmd_schema() -> anyhow::Result<i32> {
    print!("{}", to_json_pretty(&extproj_settings::config_schema())?);
    Ok(0)
}
