use std::path::PathBuf;

use catalog::build_indexes;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Mapping spreadsheet, repeatable; later files win.
    #[arg(short, long = "mapping", default_values = [
        "data/mapping_1sem.xlsx",
        "data/mapping_3sem.xlsx",
        "data/mapping_5sem.xlsx",
    ])]
    mappings: Vec<PathBuf>,

    #[arg(long, default_value = "data/drive_manifest.csv")]
    manifest: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print table sizes and per-file column choices.
    Stats,

    /// Resolve roll numbers the way `/search` does.
    Resolve { rolls: Vec<String> },
}

fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let index = build_indexes(&args.mappings, &args.manifest)?;

    match args.command {
        Command::Stats => {
            println!("{}", serde_json::to_string_pretty(&process::summarize(&index))?);
        }
        Command::Resolve { rolls } => {
            for roll in rolls {
                println!("{}", process::lookup(&index, &roll));
            }
        }
    }

    Ok(())
}
