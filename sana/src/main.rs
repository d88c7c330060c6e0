use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::debug;
use miden_diagnostics::{
    term::termcolor::ColorChoice, CodeMap, DefaultEmitter, DiagnosticsHandler, Severity,
};
use sana::{emit, BuildOptions};

/// Symbolic analysis of lumped linear electric circuits.
///
/// Reads a netlist, extracts the symbolic transfer function of the designated
/// output node, and writes it next to the input as `<FILE>.out` (text) and
/// `<FILE>.fdt` (binary cache).
#[derive(Debug, Parser)]
#[command(name = "sana", version)]
struct Cli {
    /// Print information about sana and exit
    #[arg(short, long)]
    info: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// SapWin compatibility: reverse the sign of source companion edges
    #[arg(short = 's', long = "sapwin")]
    sapwin: bool,

    /// Treat the input as a previously written binary cache and re-emit the
    /// textual form
    #[arg(short, long)]
    binary: bool,

    /// The input netlist (or binary cache with -b)
    input: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    if cli.info {
        println!("sana: symbolic nodal analysis of electric circuits");
        println!("version: {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let result = if cli.binary {
        let input = cli.input.unwrap_or_else(|| PathBuf::from("./circuit.fdt"));
        reemit(&input)
    } else {
        let input = cli.input.unwrap_or_else(|| PathBuf::from("./circuit"));
        resolve(&input, BuildOptions { reverse_sign: cli.sapwin })
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("sana: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Parse-and-analyze mode: netlist in, `.out` and `.fdt` files out.
fn resolve(input: &Path, options: BuildOptions) -> anyhow::Result<()> {
    let codemap = Arc::new(CodeMap::new());
    let emitter = Arc::new(DefaultEmitter::new(ColorChoice::Auto));
    let diagnostics = DiagnosticsHandler::new(Default::default(), codemap.clone(), emitter);

    debug!("reading netlist from {}", input.display());
    let source = fs::read_to_string(input)
        .with_context(|| format!("unable to read {}", input.display()))?;

    let tf = match sana::compile(&diagnostics, codemap, &source, options) {
        Ok(tf) => tf,
        Err(err) => {
            // analysis failures are reported through diagnostics; only I/O
            // failures change the exit code
            diagnostics.diagnostic(Severity::Error).with_message(err.to_string()).emit();
            return Ok(());
        }
    };

    let text_path = suffixed(input, ".out");
    debug!("writing text output to {}", text_path.display());
    fs::write(&text_path, emit::render_transfer(&tf))
        .with_context(|| format!("unable to write {}", text_path.display()))?;

    let cache_path = suffixed(input, ".fdt");
    debug!("writing binary cache to {}", cache_path.display());
    File::create(&cache_path)
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            emit::write_transfer(&mut writer, &tf)?;
            writer.flush()
        })
        .with_context(|| format!("unable to write {}", cache_path.display()))?;

    Ok(())
}

/// Binary mode: read a cache written by a previous run and re-emit the text.
fn reemit(input: &Path) -> anyhow::Result<()> {
    debug!("reading binary cache from {}", input.display());
    let tf = File::open(input)
        .and_then(|file| emit::read_transfer(&mut BufReader::new(file)))
        .with_context(|| format!("unable to read {}", input.display()))?;

    let text_path = suffixed(input, ".out");
    debug!("writing text output to {}", text_path.display());
    fs::write(&text_path, emit::render_transfer(&tf))
        .with_context(|| format!("unable to write {}", text_path.display()))?;

    Ok(())
}

/// `circuit` -> `circuit.out`, keeping the full input path intact.
fn suffixed(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}
