mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, framework::FrameworkSubcommand, steering::SteeringSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "suit",
    about = "Manage Kiro steering documents and framework references",
    version,
    propagate_version = true
)]
struct Cli {
    /// Workspace root (default: auto-detect from .kiro/ or .git/)
    #[arg(long, global = true, env = "SUIT_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Global state file (default: ~/.suit/state.yaml)
    #[arg(long, global = true, env = "SUIT_STATE_FILE")]
    state_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .kiro/steering and install the bundled steering documents
    Init,

    /// Show which steering documents exist and where they come from
    Status,

    /// Create, rename, delete, and validate steering documents
    Steering {
        #[command(subcommand)]
        subcommand: SteeringSubcommand,
    },

    /// Browse, search, and install bundled framework references
    Framework {
        #[command(subcommand)]
        subcommand: FrameworkSubcommand,
    },

    /// Inspect and validate .kiro/suit.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root, cli.state_file.as_deref(), cli.json),
        Commands::Status => cmd::status::run(&root, cli.json),
        Commands::Steering { subcommand } => cmd::steering::run(&root, subcommand, cli.json),
        Commands::Framework { subcommand } => cmd::framework::run(&root, subcommand, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
