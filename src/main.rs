//! qsdoc — generate an API reference from `///` comments in Q# sources.
//!
//! Every matched file is scanned for its namespace and documented callables,
//! the results are merged by namespace, and a single document with a linked
//! table of contents is written:
//!
//! `qsdoc -o API.md -l LICENSE-HEADER.txt 'App/*.qs' 'App/*/*.qs'`

mod model;
mod parser;
mod render;
mod toc;

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Patterns scanned when none are given on the command line.
const DEFAULT_PATTERNS: &[&str] = &["App/*.qs", "App/*/*.qs"];

#[derive(Parser)]
#[command(
    name = "qsdoc",
    about = "Generate a namespace-grouped API reference from /// comments in Q# sources"
)]
struct Cli {
    /// Input files, directories or glob patterns, scanned in order.
    /// Defaults to App/*.qs and App/*/*.qs.
    patterns: Vec<String>,

    /// Output file (overwritten on every run)
    #[arg(short = 'o', long, default_value = "API.md")]
    output: PathBuf,

    /// Document title
    #[arg(short = 't', long, default_value = "API Documentation")]
    title: String,

    /// File whose contents are printed under the title as the license block
    #[arg(short = 'l', long)]
    license: Option<PathBuf>,

    /// Number of '#' prepended to headings found inside documentation
    #[arg(long, default_value_t = 3)]
    heading_level: usize,

    /// Extension of source files picked up when a pattern is a directory
    #[arg(short = 'e', long, default_value = "qs")]
    extension: String,

    /// Output format: markdown (default) or json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(&cli)
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match verbose {
        0 => "qsdoc=warn",
        1 => "qsdoc=debug",
        _ => "qsdoc=trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    // Fail on a bad format before doing any scanning.
    let renderer = render::create_renderer(&cli.format)?;

    let license = cli
        .license
        .as_deref()
        .map(|path| {
            fs::read_to_string(path)
                .with_context(|| format!("failed to read license file: {}", path.display()))
        })
        .transpose()?;

    let patterns: Vec<String> = if cli.patterns.is_empty() {
        DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect()
    } else {
        cli.patterns.clone()
    };
    let input_files = expand_patterns(&patterns, &cli.extension)?;

    let units = input_files
        .iter()
        .map(|path| parser::parse_file(path, cli.heading_level))
        .collect::<Result<Vec<_>>>()?;
    let table = parser::merge::merge(units);

    let settings = model::DocumentSettings {
        title: cli.title.clone(),
        license,
    };
    let output = renderer.render(&table, &settings)?;

    fs::write(&cli.output, &output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    tracing::info!(
        files = input_files.len(),
        namespaces = table.len(),
        functions = table.values().map(|f| f.len()).sum::<usize>(),
        output = %cli.output.display(),
        "documentation written"
    );
    Ok(())
}

/// Expand patterns into source files, in pattern order.
///
/// A pattern naming a file is taken as-is, a directory contributes its files
/// with `extension` (non-recursive), anything else is a glob. Matches of one
/// pattern are sorted; a path already picked up by an earlier pattern is
/// skipped so it is scanned only once.
fn expand_patterns(patterns: &[String], extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut seen = HashSet::new();

    for pattern in patterns {
        let path = Path::new(pattern);
        let mut matches: Vec<PathBuf> = if path.is_file() {
            vec![path.to_path_buf()]
        } else if path.is_dir() {
            scan_directory(path, extension)?
        } else {
            glob::glob(pattern)
                .with_context(|| format!("invalid glob pattern: {}", pattern))?
                .filter_map(|r| r.ok())
                .filter(|p| p.is_file())
                .collect()
        };

        if matches.is_empty() {
            tracing::warn!(pattern = %pattern, "no files matched");
        }
        matches.sort();

        for file in matches {
            if seen.insert(file.clone()) {
                files.push(file);
            }
        }
    }

    Ok(files)
}

fn scan_directory(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let p = entry
            .with_context(|| format!("failed to read directory: {}", dir.display()))?
            .path();
        if p.is_file() && p.extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(p);
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, rel: &str) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn glob_matches_sorted_within_pattern() {
        let dir = TempDir::new().unwrap();
        let b = touch(dir.path(), "App/b.qs");
        let a = touch(dir.path(), "App/a.qs");
        let nested = touch(dir.path(), "App/Sub/c.qs");
        touch(dir.path(), "App/notes.txt");

        let patterns = vec![
            format!("{}/App/*.qs", dir.path().display()),
            format!("{}/App/*/*.qs", dir.path().display()),
        ];
        let files = expand_patterns(&patterns, "qs").unwrap();
        assert_eq!(files, vec![a, b, nested]);
    }

    #[test]
    fn pattern_order_is_kept_and_duplicates_dropped() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a.qs");
        let z = touch(dir.path(), "z.qs");

        let patterns = vec![
            z.display().to_string(),
            format!("{}/*.qs", dir.path().display()),
        ];
        let files = expand_patterns(&patterns, "qs").unwrap();
        assert_eq!(files, vec![z, a]);
    }

    #[test]
    fn directory_pattern_filters_by_extension() {
        let dir = TempDir::new().unwrap();
        let q = touch(dir.path(), "one.qs");
        touch(dir.path(), "two.cs");
        touch(dir.path(), "deeper/three.qs");

        let files = expand_patterns(&[dir.path().display().to_string()], "qs").unwrap();
        assert_eq!(files, vec![q]);
    }

    #[test]
    fn unmatched_pattern_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let files =
            expand_patterns(&[format!("{}/*.qs", dir.path().display())], "qs").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn invalid_glob_is_an_error() {
        let err = expand_patterns(&["App/[*.qs".to_string()], "qs").unwrap_err();
        assert!(err.to_string().contains("invalid glob pattern"));
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["qsdoc"]);
        assert!(cli.patterns.is_empty());
        assert_eq!(cli.output, PathBuf::from("API.md"));
        assert_eq!(cli.heading_level, 3);
        assert_eq!(cli.format, "markdown");
        assert!(cli.license.is_none());
    }
}
