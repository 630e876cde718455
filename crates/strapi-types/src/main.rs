//! `strapi-types`: write `types.ts` for a Strapi project.

mod config;
mod sink;

use clap::Parser;
use config::{Config, GenerateConfig, OutputConfig, PathsConfig};
use sink::Destination;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use strapi_typegen::{CollisionPolicy, Layout, generate};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "strapi_types=info,strapi_typegen=warn";

/// Generate TypeScript declarations from Strapi content-type schemas.
#[derive(Debug, Parser)]
#[command(name = "strapi-types", version, about)]
struct Args {
    /// Extra targets. `frontend` also writes a copy for the sibling frontend project.
    tokens: Vec<String>,

    /// Strapi project root [default: current directory]
    #[arg(long)]
    root: Option<PathBuf>,

    /// Backend output directory [default: <root>/src/types]
    #[arg(long)]
    out: Option<PathBuf>,

    /// Frontend output directory [default: <root>/../frontend/src/types]
    #[arg(long)]
    frontend_out: Option<PathBuf>,

    /// Output file name [default: types.ts]
    #[arg(long)]
    file_name: Option<String>,

    /// What to do when two schemas produce the same declaration name
    /// (first-wins, last-wins, keep, error)
    #[arg(long, value_name = "POLICY")]
    on_collision: Option<CollisionPolicy>,

    /// One line per declaration instead of one line per field
    #[arg(long)]
    compact: bool,

    /// Fail when any schema was skipped
    #[arg(long)]
    strict: bool,

    /// Project config file [default: <root>/strapi-types.toml]
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Args {
    /// Command line settings as a config layer.
    fn overrides(&self) -> Config {
        let frontend = self.tokens.iter().any(|t| t == "frontend");
        Config {
            paths: PathsConfig {
                backend_out: self.out.clone(),
                frontend_out: self.frontend_out.clone(),
                ..Default::default()
            },
            output: OutputConfig {
                file_name: self.file_name.clone(),
                layout: self.compact.then_some(Layout::Compact),
                frontend: frontend.then_some(true),
            },
            generate: GenerateConfig {
                on_collision: self.on_collision,
            },
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .with(filter)
        .init();
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
    for token in args.tokens.iter().filter(|t| *t != "frontend") {
        tracing::warn!("ignoring unknown target `{token}`");
    }

    let root = match &args.root {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };
    let settings = Config::load(&root, args.config.as_deref())?
        .merge(args.overrides())
        .settings(&root);

    let generated = generate(&settings.schemas, &settings.options)?;
    for diagnostic in &generated.diagnostics {
        tracing::debug!("skipped {diagnostic}");
    }

    let mut destinations = vec![Destination::new("backend", &settings.backend_out)];
    if settings.frontend {
        destinations.push(Destination::new("frontend", &settings.frontend_out));
    }
    let failed = sink::write_all(&destinations, &settings.file_name, &generated.text);

    println!(
        "{} declarations ({} entities, {} components), {} skipped",
        generated.declarations.len(),
        generated.entity_count(),
        generated.component_count(),
        generated.skipped()
    );

    if failed > 0 {
        return Ok(ExitCode::FAILURE);
    }
    if args.strict && generated.skipped() > 0 {
        tracing::error!("{} schema(s) skipped in strict mode", generated.skipped());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    init_tracing();
    match run(Args::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
