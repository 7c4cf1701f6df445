//! rmassets - remove unreferenced images from Markdown `.assets` folders
//!
//! For each document `X.md`:
//! - extract the file names it references (Markdown, HTML and reference syntax)
//! - list the files directly inside `X.assets/`
//! - report, confirm or delete the ones nobody references

use anyhow::Result;
use clap::Parser;

mod backends;
mod cli;
mod core;
mod flows;
mod logging;
mod prune;
mod refs;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
