//! Offline preview of a chart-of-accounts export as an indented tree.
//!
//! ```bash
//! tree-preview render accounts.json --expand 1 --select 3
//! tree-preview render accounts.json --expand-all
//! tree-preview demo
//! ```

use account_tree::AccountId;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tree_preview::PreviewOptions;

#[derive(Parser)]
#[command(name = "tree-preview")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter directive (e.g. `debug`, `account_tree=trace`)
    #[arg(long, global = true, env = "TREE_PREVIEW_LOG", default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON export (`{data, meta}` envelope or bare array)
    Render {
        /// Path to the export
        file: PathBuf,

        /// Account ids to show expanded
        #[arg(short, long = "expand", value_name = "ID")]
        expand: Vec<i64>,

        /// Expand every synthetic account that has children
        #[arg(long)]
        expand_all: bool,

        /// Account id to mark as selected
        #[arg(short, long, value_name = "ID")]
        select: Option<i64>,

        /// Print the built forest as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Render the built-in sample chart fully expanded
    Demo,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render {
            file,
            expand,
            expand_all,
            select,
            json,
        } => tree_preview::load_accounts(&file).and_then(|accounts| {
            let options = PreviewOptions {
                expand: expand.into_iter().map(AccountId).collect(),
                expand_all,
                selected: select.map(AccountId),
                json,
            };
            tree_preview::preview(&accounts, &options)
        }),
        Commands::Demo => tree_preview::run_demo(),
    };

    match result {
        Ok(out) => {
            println!("{}", out.trim_end());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("tree-preview: {err:#}");
            ExitCode::FAILURE
        }
    }
}
