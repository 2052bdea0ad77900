//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tagscan",
    version,
    about = "Find custom image tags in deployment YAML files",
    long_about = "tagscan: scan YAML deployment configs for image tags that are not releases.\n\nVersions (1.2.3, v1.2.3-rc.1), commit hashes and reserved words (latest, stable, production) are ignored; everything else, e.g. feature/x, is reported per service.\n\nConfiguration precedence: CLI > tagscan.toml > defaults.",
    after_help = "Examples:\n  tagscan scan ./prods\n  tagscan scan ./prods --pattern 'prod*.yml' --format csv -o report.csv\n  tagscan classify feature/x v1.2.3 4fe602b",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[arg(long, short, global = true, action = clap::ArgAction::SetTrue, help = "Enable debug logging on stderr")]
    pub verbose: bool,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current tagscan version.")]
    Version,
    /// Scan files and directories for custom tags
    #[command(
        about = "Scan for custom tags",
        long_about = "Scan YAML files for `tag:` values, attribute each to the nearest service and report the custom ones. Directories are listed non-recursively and filtered by --pattern.",
        after_help = "Examples:\n  tagscan scan ./prods\n  tagscan scan prod1.yml prod2.yml --format md --line-numbers\n  tagscan scan ./prods --exclude-suffix -limited --exclude-suffix -canary"
    )]
    Scan {
        #[arg(help = "Files or directories to scan (default: current dir)")]
        paths: Vec<String>,
        #[arg(long, help = "Directory used to discover tagscan.toml (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, short, help = "Report format: txt|csv|md (default: txt)")]
        format: Option<String>,
        #[arg(long, short, help = "Also write the report to this file")]
        output: Option<String>,
        #[arg(long, short, help = "File-name glob for directory inputs (repeatable; default: *.yml, *.yaml)")]
        pattern: Vec<String>,
        #[arg(long, allow_hyphen_values = true, help = "Drop services whose name ends with this suffix (repeatable; default: -limited)")]
        exclude_suffix: Vec<String>,
        #[arg(long, help = "Deepest indentation at which a service is recognized (default: 4)")]
        max_service_indent: Option<usize>,
        #[arg(long, short, action = clap::ArgAction::SetTrue, help = "Do not print the report to stdout")]
        quiet: bool,
        #[arg(long, short, action = clap::ArgAction::SetTrue, help = "Show the source line of each tag")]
        line_numbers: bool,
    },
    /// Classify tag values
    #[command(
        about = "Classify tags",
        long_about = "Print whether each given tag is custom or standard under the effective rules."
    )]
    Classify {
        #[arg(long, help = "Directory used to discover tagscan.toml (default: current dir)")]
        repo_root: Option<String>,
        #[arg(required = true, help = "Tag values to classify")]
        tags: Vec<String>,
    },
}
