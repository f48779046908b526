use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use fv1_rs::{disassemble, Options};

mod image;
use image::{load_image, program_slice, PROGBYTES};

#[derive(Parser, Debug)]
#[command(author, version, about = "Disassemble a single FV-1 DSP program", long_about = None)]
struct Cli {
    /// Binary program file
    #[arg(value_name = "BINFILE")]
    input: PathBuf,
    /// Assembly program output file (default: stdout)
    #[arg(value_name = "ASMFILE")]
    output: Option<PathBuf>,
    /// Suppress warnings
    #[arg(short, long)]
    quiet: bool,
    /// Use relative skip targets
    #[arg(short, long)]
    relative: bool,
    /// Convert invalid/raw statements into nop
    #[arg(short = 's', long = "suppressraw")]
    suppress_raw: bool,
    /// Program number within a multi-program image
    #[arg(short = 'p', long = "program", value_parser = clap::value_parser!(u8).range(0..=7))]
    program: Option<u8>,
    /// Output format: text listing or JSON report
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let quiet = cli.quiet;
    let mut sink = move |msg: &str| {
        if !quiet {
            eprintln!("{msg}");
        }
    };
    sink(&format!("FV-1 Disassembler v{}", env!("CARGO_PKG_VERSION")));
    sink(&format!("info: Reading input from {}", cli.input.display()));

    let bytes = load_image(&cli.input)?;
    tracing::debug!(bytes = bytes.len(), "loaded image");

    let slot = cli.program.unwrap_or(0) as usize;
    if let Some(p) = cli.program {
        sink(&format!(
            "info: Reading from program {p} at offset {:#06x}",
            slot * PROGBYTES
        ));
    }
    let source = program_slice(&bytes, slot)?;

    let opts = Options {
        relative_skip: cli.relative,
        suppress_raw: cli.suppress_raw,
    };
    let listing = disassemble(source, opts, &mut sink);

    let text = match cli.format {
        OutputFormat::Text => listing.render(),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&listing)?;
            json.push('\n');
            json
        }
    };
    match cli.output {
        Some(path) => std::fs::write(path, text)?,
        None => print!("{text}"),
    }
    Ok(())
}
