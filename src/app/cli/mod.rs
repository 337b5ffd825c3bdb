//! CLI Adapter.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::app::api::{self, MigrateOptions, NewOptions};
use crate::domain::AppError;
use crate::domain::mapping::MappingWarning;

#[derive(Parser)]
#[command(name = "cdkgen")]
#[command(version)]
#[command(
    about = "Generate Guardian-flavoured CDK stacks from CloudFormation templates",
    long_about = None
)]
struct Cli {
    /// Log diagnostics to stderr at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Migrate a CloudFormation template to a CDK stack
    #[clap(visible_alias = "m")]
    Migrate {
        /// The template file to migrate
        template: PathBuf,
        /// The CDK directory to create the new files in
        output: PathBuf,
        /// A name to give the stack. Defaults to match the filename
        stack: Option<String>,
        /// A name to give the app. Defaults to the stack name
        #[arg(long)]
        app: Option<String>,
        /// Place the stack under lib/<app>/
        #[arg(long)]
        multi_app: bool,
        /// Generator configuration file (defaults to ./cdkgen.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Create a new CDK stack
    #[clap(visible_alias = "n")]
    New {
        /// The CDK directory to create the new files in
        output: PathBuf,
        /// A name to give the app
        app: String,
        /// A name to give the stack
        stack: String,
        /// Place the stack under lib/<app>/
        #[arg(long)]
        multi_app: bool,
        /// Generator configuration file (defaults to ./cdkgen.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<(), AppError> = match cli.command {
        Commands::Migrate { template, output, stack, app, multi_app, config } => run_migrate(
            MigrateOptions { template, output, stack, app, multi_app },
            config.as_deref(),
        ),
        Commands::New { output, app, stack, multi_app, config } => {
            run_new(NewOptions { output, app, stack, multi_app }, config.as_deref())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` takes precedence; otherwise errors only, or debug with `--verbose`.
fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::ERROR };
    let filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

fn run_migrate(options: MigrateOptions, config: Option<&Path>) -> Result<(), AppError> {
    let template = options.template.display().to_string();
    let outcome = api::migrate(options, config)?;

    print_warnings(&outcome.warnings);
    println!("✅ Migrated {} to stack {} (app {})", template, outcome.stack_name, outcome.app_name);
    print_written(&outcome.written);
    Ok(())
}

fn run_new(options: NewOptions, config: Option<&Path>) -> Result<(), AppError> {
    let outcome = api::new_stack(options, config)?;

    if outcome.parameters.is_empty() {
        println!("✅ Created stack {}", outcome.stack_name);
    } else {
        println!(
            "✅ Created stack {} with parameters: {}",
            outcome.stack_name,
            outcome.parameters.join(", ")
        );
    }
    print_written(&outcome.written);
    Ok(())
}

fn print_warnings(warnings: &[MappingWarning]) {
    for warning in warnings {
        println!("⚠️  {}", warning);
    }
}

fn print_written(paths: &[PathBuf]) {
    for path in paths {
        println!("   {}", path.display());
    }
}
