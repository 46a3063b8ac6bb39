/// Example extracting a limited amount of text from .odt and .docx files.
///
/// This example shows:
/// - Picking the format from the file extension (or forcing it)
/// - Limiting by characters or by bytes
/// - Telling a complete extraction from a truncated one
/// - Recovering partial text from a damaged document
///
/// Run with `RUST_LOG=docslice=debug` to see the extraction trace.
use clap::{Parser, ValueEnum};
use docslice::{DocumentFormat, Error, ExtractOptions, LimitUnit, Status};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Odt,
    Docx,
}

#[derive(Parser, Debug)]
#[command(about = "Print the first N characters of an ODT or DOCX document")]
struct Args {
    /// Documents to read
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Budget per document
    #[arg(short, long, default_value_t = 200)]
    limit: usize,

    /// Count the budget in UTF-8 bytes instead of characters
    #[arg(long)]
    bytes: bool,

    /// Format to assume instead of guessing from the extension
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let unit = if args.bytes { LimitUnit::Bytes } else { LimitUnit::Chars };
    let options = ExtractOptions::new().with_limit(args.limit).with_unit(unit);

    let mut failed = false;
    for path in &args.files {
        let format = match args.format {
            Some(FormatArg::Odt) => Some(DocumentFormat::Odt),
            Some(FormatArg::Docx) => Some(DocumentFormat::Docx),
            None => DocumentFormat::from_extension(path),
        };
        let Some(format) = format else {
            eprintln!("{}: unknown extension, use --format", path.display());
            failed = true;
            continue;
        };

        println!("📄 {} ({})", path.display(), format);
        match docslice::read_limited_file(path, format, &options) {
            Ok(extract) => {
                let note = match extract.status {
                    Status::Complete => "whole document",
                    Status::Truncated => "truncated",
                };
                println!("   [{}]\n   {}\n", note, extract.text);
            },
            Err(Error::MalformedXml { detail, partial }) => {
                eprintln!("   ⚠ malformed content: {}", detail);
                if !partial.is_empty() {
                    println!("   [recovered]\n   {}\n", partial);
                }
                failed = true;
            },
            Err(e) => {
                eprintln!("   ✗ {}\n", e);
                failed = true;
            },
        }
    }

    if failed {
        std::process::exit(1);
    }
}
