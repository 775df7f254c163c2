use anyhow::Result;
use clap::Parser;

use literature_taxonomy::cli::{Cli, Commands};
use literature_taxonomy::commands::{run_commit, run_pipeline, run_queue, run_tree};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Queue(args) => {
            run_queue(args)?;
        }
        Commands::Commit(args) => {
            run_commit(args)?;
        }
        Commands::Tree(args) => {
            run_tree(args)?;
        }
        Commands::Pipeline(args) => {
            run_pipeline(args)?;
        }
    }

    Ok(())
}
