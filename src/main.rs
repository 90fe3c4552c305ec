use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use huff_compressor::{compress_file, decompress_file, EncodingTree, FrequencyTable};

/// Huffman file compressor.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Compress and decompress files with Huffman codes",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress INPUT into OUTPUT
    Compress { input: PathBuf, output: PathBuf },
    /// Decompress INPUT into OUTPUT
    Decompress { input: PathBuf, output: PathBuf },
    /// Print the code assigned to every symbol of INPUT
    Codes {
        input: PathBuf,
        /// Also write the code book to this file as bincode
        #[arg(long)]
        dump: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Command::Compress { input, output } => {
            let report = compress_file(&input, &output)
                .with_context(|| format!("compressing {}", input.display()))?;
            info!(
                "{} -> {}: {} bytes to {} bytes ({:.1}%)",
                input.display(),
                output.display(),
                report.input_bytes,
                report.output_bytes(),
                report.ratio() * 100.0
            );
        }
        Command::Decompress { input, output } => {
            let written = decompress_file(&input, &output)
                .with_context(|| format!("decompressing {}", input.display()))?;
            info!("{} -> {}: {} bytes", input.display(), output.display(), written);
        }
        Command::Codes { input, dump } => {
            let mut reader = BufReader::new(
                File::open(&input).with_context(|| format!("opening {}", input.display()))?,
            );
            let table = FrequencyTable::compute(&mut reader)?;
            let book = EncodingTree::build(&table)?.code_book();
            for (symbol, code) in book.iter() {
                let count = table.get(symbol).unwrap_or(0);
                println!("{:>6} {:>10} {}", symbol.to_string(), count, code);
            }
            if let Some(path) = dump {
                fs::write(&path, book.to_bincode()?)
                    .with_context(|| format!("writing {}", path.display()))?;
                info!("wrote code book to {}", path.display());
            }
        }
    }

    Ok(())
}
