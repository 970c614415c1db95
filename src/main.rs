//! dtsgen — generate a TypeScript declaration file from `/*JSON` annotation
//! blocks in native wrapper sources.
//!
//! - **stdin mode**: `dtsgen < jswrap_pin.c`
//! - **file mode**: `dtsgen -o types.d.ts src/ libs/ targets/`

mod error;
mod model;
mod parser;
mod render;
mod resolve;
mod taxonomy;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "dtsgen",
    about = "Generate TypeScript declarations from /*JSON annotation blocks in native sources"
)]
struct Cli {
    /// Input files, directories or glob patterns. If omitted, reads from stdin.
    inputs: Vec<String>,

    /// File-name pattern used when walking directories
    #[arg(long, default_value = "jswrap*.c")]
    pattern: String,

    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: dts (default), json
    #[arg(short = 'f', long, default_value = "dts")]
    format: String,

    /// Exit non-zero if any block was malformed or any owner unresolved
    #[arg(long)]
    strict: bool,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let renderer = render::create_renderer(&cli.format)?;
    let sources = read_sources(&cli)?;

    let mut records = Vec::new();
    let mut problems = 0usize;
    for (index, (name, content)) in sources.iter().enumerate() {
        let scan = parser::parse_file(name, index, content);
        if let Some(e) = scan.error {
            warn!("skipping rest of {}: {}", name, e);
            problems += 1;
        }
        records.extend(scan.records);
    }

    let (document, diagnostics) = resolve::resolve(records);
    for diagnostic in &diagnostics {
        warn!("{}", diagnostic);
    }
    problems += diagnostics.len();
    info!(
        "{} owner(s), {} free-standing declaration(s) from {} file(s)",
        document.owners.len(),
        document.free.len(),
        sources.len()
    );

    let output = renderer.render(&document)?;
    match cli.output {
        Some(ref path) => fs::write(path, &output)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", output),
    }

    if cli.strict && problems > 0 {
        anyhow::bail!("{} problem(s) reported", problems);
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal()),
        )
        .init();
}

/// Read every input as `(display name, content)`. A failed read is fatal;
/// bytes that are not UTF-8 are replaced, not rejected.
fn read_sources(cli: &Cli) -> Result<Vec<(String, String)>> {
    if cli.inputs.is_empty() {
        let mut input = Vec::new();
        io::stdin()
            .read_to_end(&mut input)
            .context("failed to read stdin")?;
        return Ok(vec![("<stdin>".to_string(), decode_source(&input))]);
    }

    let mut sources = Vec::new();
    for path in expand_inputs(&cli.inputs, &cli.pattern)? {
        let bytes = fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
        sources.push((path.to_string_lossy().to_string(), decode_source(&bytes)));
    }
    Ok(sources)
}

/// Old C sources often carry stray Latin-1 bytes in comments.
fn decode_source(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Expand inputs into a sorted, de-duplicated list of files. Directories are
/// walked recursively for files matching `pattern`.
fn expand_inputs(inputs: &[String], pattern: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        let path = Path::new(input);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        let glob_pattern = if path.is_dir() {
            format!("{}/**/{}", input.trim_end_matches('/'), pattern)
        } else {
            input.clone()
        };
        let matches: Vec<_> = glob::glob(&glob_pattern)
            .with_context(|| format!("invalid glob pattern: {}", glob_pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", input);
        }
        debug!("{}: {} file(s)", input, matches.len());
        files.extend(matches);
    }
    // Sorted order defines the discovery order across files.
    files.sort();
    files.dedup();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn directories_are_walked_with_pattern() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("libs")).unwrap();
        fs::write(dir.path().join("jswrap_b.c"), "").unwrap();
        fs::write(dir.path().join("libs/jswrap_a.c"), "").unwrap();
        fs::write(dir.path().join("other.c"), "").unwrap();

        let root = dir.path().to_string_lossy().to_string();
        let files = expand_inputs(&[root], "jswrap*.c").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["jswrap_b.c", "libs/jswrap_a.c"]);
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let text = decode_source(b"// temperature in \xb0C\n/*JSON{}*/\n");
        assert!(text.starts_with("// temperature in \u{fffd}C\n"));
        assert!(text.ends_with("/*JSON{}*/\n"));
    }

    #[test]
    fn inputs_are_sorted_and_deduplicated() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.c");
        let b = dir.path().join("b.c");
        fs::write(&a, "").unwrap();
        fs::write(&b, "").unwrap();

        let inputs = vec![
            b.to_string_lossy().to_string(),
            a.to_string_lossy().to_string(),
            b.to_string_lossy().to_string(),
        ];
        assert_eq!(expand_inputs(&inputs, "*.c").unwrap(), vec![a, b]);
    }
}
