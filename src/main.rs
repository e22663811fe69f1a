use anyhow::Result;
use clap::Parser;

use wordfreq::{cli, logging};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    logging::initialize(logging::level_for(cli.quiet, cli.verbose), cli.no_color);
    cli::run(cli)
}
