//! Tagscan CLI binary entry point.
//! Resolves configuration, delegates to the library and prints results.

use clap::Parser;
use std::path::{Path, PathBuf};
use tagscan::cli::{Cli, Commands};
use tagscan::discover::{self, FileMatcher};
use tracing::debug;
use tagscan::render::{self, ReportFormat};
use tagscan::{aggregate, config, logging, output, utils};

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", utils::error_prefix(), msg);
    std::process::exit(2);
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Scan {
            paths,
            repo_root,
            format,
            output,
            pattern,
            exclude_suffix,
            max_service_indent,
            quiet,
            line_numbers,
        } => {
            let eff = config::resolve_effective(&config::CliOverrides {
                repo_root: repo_root.as_deref(),
                format: format.as_deref(),
                patterns: &pattern,
                output: output.as_deref(),
                quiet,
                exclude_suffixes: &exclude_suffix,
                max_service_indent,
                line_numbers,
            });
            // Validate the selector before doing any work
            let fmt: ReportFormat = eff.format.parse().unwrap_or_else(|e| fail(e));
            let matcher = FileMatcher::new(&eff.patterns).unwrap_or_else(|e| fail(e));
            debug!(
                root = %eff.repo_root.display(),
                config_found = eff.config_found,
                format = fmt.as_str(),
                line_numbers = eff.render.line_numbers,
                "effective configuration"
            );

            let inputs: Vec<PathBuf> = if paths.is_empty() {
                vec![PathBuf::from(".")]
            } else {
                paths.iter().map(PathBuf::from).collect()
            };
            let files = discover::collect_inputs(&inputs, &matcher);
            if files.is_empty() {
                eprintln!(
                    "{} no files matched [{}]",
                    utils::note_prefix(),
                    eff.patterns.join(", ")
                );
            }

            let (reports, summary) = aggregate::aggregate(&files, &eff.policy);
            output::print_file_errors(&reports);
            let report =
                render::render(&reports, &summary, fmt, eff.render).unwrap_or_else(|e| fail(e));
            output::print_report(&report, eff.quiet);

            if let Some(out) = eff.output.as_deref() {
                let target = Path::new(out);
                if let Err(e) = output::write_report(target, &report) {
                    fail(e);
                }
                eprintln!(
                    "{} {} report saved to {}",
                    utils::note_prefix(),
                    fmt.as_str(),
                    target.to_string_lossy()
                );
            }

            // Nothing could be read at all
            if !reports.is_empty() && reports.iter().all(|r| r.had_error) {
                std::process::exit(1);
            }
        }
        Commands::Classify { repo_root, tags } => {
            let eff = config::resolve_effective(&config::CliOverrides {
                repo_root: repo_root.as_deref(),
                ..Default::default()
            });
            if !eff.config_found {
                debug!(root = %eff.repo_root.display(), "no tagscan config, using default rules");
            }
            for tag in &tags {
                output::print_classification(tag, eff.policy.classifier.classify(tag));
            }
        }
    }
}
