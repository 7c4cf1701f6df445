//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::core::render::{OutputFormat, RenderConfig};
use crate::prune::PruneMode;

/// rmassets - delete images a Markdown document no longer references.
#[derive(Parser, Debug)]
#[command(name = "rmassets")]
#[command(
    author,
    version,
    about,
    long_about = r#"For a Markdown document X.md, rmassets treats the sibling folder X.assets/
as its asset directory. Files directly inside that folder that the document
does not reference are deleted.

References are found in:
- Markdown images: ![alt](path "title")
- HTML images: <img src="path">
- Reference definitions: [id]: path
- Any X.assets/name) path in the text

Only the file name of a reference is compared, so ./sub/img.png protects
X.assets/img.png. Subdirectories of X.assets/ are never touched.

Detection is best effort: an unusual reference syntax can make a used file
look unused. Run with --dry-run first.

Examples:
    rmassets notes.md               # ask before each deletion
    rmassets notes.md --dry-run     # only list what would be deleted
    rmassets . --yes                # every .md in the current directory, no prompts
"#
)]
pub struct Cli {
    /// Markdown files or directories to process.
    #[arg(
        value_name = "PATH",
        required = true,
        num_args = 1..,
        long_help = "Markdown files or directories to process.\n\n\
A directory contributes the .md files directly inside it (not recursive).\n\
Other paths are ignored with a warning."
    )]
    pub paths: Vec<PathBuf>,

    /// Show what would be deleted without removing files.
    #[arg(long, conflicts_with = "yes")]
    pub dry_run: bool,

    /// Do not prompt; delete every unreferenced file.
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Output format (text/jsonl/json).
    #[arg(
        long,
        default_value = "text",
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- text (default): human-readable report\n\
- jsonl: one JSON object per line, summary last\n\
- json: a single JSON array, summary last"
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long)]
    pub pretty: bool,

    /// Disable colored output.
    #[arg(
        long,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        long_help = "Disable colored output. The NO_COLOR environment variable has the same effect."
    )]
    pub no_color: bool,

    /// Quiet mode (only actions and the summary).
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(
        short,
        long,
        long_help = "Enable debug diagnostics on stderr. For finer control set RMASSETS_LOG\n\
to a tracing filter, e.g. RMASSETS_LOG=rmassets=trace."
    )]
    pub verbose: bool,
}

impl Cli {
    pub fn mode(&self) -> PruneMode {
        PruneMode::from_flags(self.dry_run, self.yes)
    }

    pub fn render_config(&self) -> Result<RenderConfig> {
        let format: OutputFormat = self.format.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        Ok(RenderConfig::with_pretty(format, self.pretty).quiet(self.quiet))
    }
}

/// Run the CLI
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }
    crate::logging::init_logging(cli.verbose, !cli.no_color)?;

    let render_config = cli.render_config()?;
    crate::flows::batch::run_prune(&cli.paths, cli.mode(), render_config)
}
