use anyhow::Context;
use clap::Parser;
use vpts_processor::cli::{run, setup_logging, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    run(cli).context("vpts-processor failed")
}
