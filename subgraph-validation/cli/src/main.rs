use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use subgraph_validation::CompositionError;
use subgraph_validation::ErrorCode;
use subgraph_validation::MalformedFragments;
use subgraph_validation::Subgraph;
use subgraph_validation::ValidationOptions;
use subgraph_validation::validate_subgraphs;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// CLI arguments. See <https://docs.rs/clap/latest/clap/_derive/index.html>
#[derive(Parser)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Checks that enum types agree across subgraphs
    Enums {
        /// Subgraph schemas as `name=path`, or a bare path named after its file stem. `-` reads
        /// from stdin
        #[arg(required = true)]
        subgraphs: Vec<SubgraphArg>,
        /// Print errors as a JSON array
        #[arg(long)]
        json: bool,
        /// Report definitions that cannot be compared instead of skipping them
        #[arg(long)]
        report_malformed: bool,
        /// A JSON file with validation options
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Lists the error codes this tool can report
    Codes,
}

#[derive(Clone, Debug, PartialEq)]
struct SubgraphArg {
    name: String,
    path: PathBuf,
}

impl FromStr for SubgraphArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((name, path)) = s.split_once('=') {
            if name.is_empty() || path.is_empty() {
                return Err(format!("expected `name=path`, got `{s}`"));
            }
            return Ok(Self {
                name: name.to_owned(),
                path: PathBuf::from(path),
            });
        }
        let path = PathBuf::from(s);
        let name = if s == "-" {
            "stdin".to_owned()
        } else {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .ok_or_else(|| format!("cannot name a subgraph after `{s}`"))?
        };
        Ok(Self { name, path })
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let result = match args.command {
        Command::Enums {
            subgraphs,
            json,
            report_malformed,
            config,
        } => validate_enums(&subgraphs, json, report_malformed, config.as_deref()),
        Command::Codes => {
            print_codes();
            Ok(true)
        }
    };
    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the subgraphs are consistent.
fn validate_enums(
    subgraphs: &[SubgraphArg],
    json: bool,
    report_malformed: bool,
    config: Option<&Path>,
) -> anyhow::Result<bool> {
    let options = load_options(config, report_malformed)?;
    let subgraphs = subgraphs
        .iter()
        .map(load_subgraph)
        .collect::<anyhow::Result<Vec<_>>>()?;
    debug!(subgraphs = subgraphs.len(), ?options, "validating enums");

    match validate_subgraphs(&subgraphs, options) {
        Ok(()) => {
            if json {
                println!("[]");
            }
            Ok(true)
        }
        Err(errors) => {
            println!("{}", render_errors(&errors, json)?);
            Ok(false)
        }
    }
}

fn load_options(
    config: Option<&Path>,
    report_malformed: bool,
) -> anyhow::Result<ValidationOptions> {
    let mut options = match config {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ValidationOptions::default(),
    };
    if report_malformed {
        options.malformed_fragments = MalformedFragments::Report;
    }
    Ok(options)
}

fn load_subgraph(arg: &SubgraphArg) -> anyhow::Result<Subgraph> {
    let sdl = if arg.path == Path::new("-") {
        io::read_to_string(io::stdin()).context("reading subgraph from stdin")?
    } else {
        fs::read_to_string(&arg.path)
            .with_context(|| format!("reading subgraph {}", arg.path.display()))?
    };
    let url = format!("file://{}", arg.path.display());
    Ok(Subgraph::parse(&arg.name, &url, &sdl)?)
}

fn render_errors(errors: &[CompositionError], json: bool) -> anyhow::Result<String> {
    if json {
        let errors = errors
            .iter()
            .map(|error| {
                serde_json::json!({
                    "code": error.code(),
                    "message": error.to_string(),
                    "impactedServices": error.impacted_services(),
                })
            })
            .collect::<Vec<_>>();
        Ok(serde_json::to_string_pretty(&errors)?)
    } else {
        Ok(errors
            .iter()
            .map(|error| format!("{}: {}", error.code(), error))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

fn print_codes() {
    for code in ErrorCode::all() {
        println!("{code}: {}", code.definition());
    }
}
