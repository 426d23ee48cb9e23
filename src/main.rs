//! Thin CLI front end over the `lzwrs` library: subcommand dispatch,
//! directory walking, and per-file reporting live in `driver`; this file
//! only wires `clap` to it, keeping argument parsing separate from the
//! codec itself.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use lzwrs::driver::{self, Mode, Options};

#[derive(Parser)]
#[command(name = "lzwrs", version, about = "Lossless file compression with variable-width LZW")]
struct Cli {
    /// Enable debug-level logging, equivalent to RUST_LOG=debug
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compress one or more files, appending the .Z extension
    Compress(FileArgs),
    /// Decompress one or more .Z files
    Decompress(FileArgs),
}

#[derive(Args)]
struct FileArgs {
    /// Files (or, with -r, directories) to process
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Recurse into directories
    #[arg(short, long)]
    recursive: bool,

    /// Keep the source file instead of deleting it on success
    #[arg(short, long)]
    keep: bool,

    /// Compress even if it doesn't shrink the file; decompress files
    /// lacking the .Z extension
    #[arg(short, long)]
    force: bool,

    /// Print elapsed time per file
    #[arg(short, long)]
    time: bool,

    /// Print a one-line summary per file
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::init();
    if cli.debug {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let (mode, args) = match cli.command {
        Command::Compress(args) => (Mode::Compress, args),
        Command::Decompress(args) => (Mode::Decompress, args),
    };

    let opts = Options {
        recursive: args.recursive,
        keep: args.keep,
        force: args.force,
        time: args.time,
        verbose: args.verbose,
    };

    let files = match driver::collect_files(&args.paths, opts.recursive) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("lzwrs: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let mut had_error = false;
    for file in files {
        if let Err(e) = driver::handle_file(mode, &file, &opts) {
            log::error!("failed to process '{}': {e:#}", file.display());
            eprintln!("lzwrs: '{}': {e:#}", file.display());
            had_error = true;
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
