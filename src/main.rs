use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use treecopy::cancel::{handle_interrupts, CancellationFlag, InterruptOutcome};
use treecopy::config::CopySettings;
use treecopy::errors::Result;
use treecopy::logger::initialize_logger;
use treecopy::prompt::{Destination, InquirePrompter};
use treecopy::{copy_folder_contents, CopyMode, CopyOutcome, CopyRequest};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    #[command(subcommand)]
    cmd: SubCommands,
}

#[derive(Subcommand, Debug, Clone)]
enum SubCommands {
    /// Copy the contents of a directory and all of its subdirectories
    Recursive(CopyArgs),
    /// Copy only the files directly inside a directory
    TopLevel(CopyArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Target {
    Clipboard,
    File,
}

#[derive(Parser, Debug, Clone)]
struct CopyArgs {
    dir: PathBuf,
    #[arg(long, env = "TREECOPY_SETTINGS", help = "JSON settings file")]
    settings: Option<PathBuf>,
    #[arg(long = "ignore", help = "Extra ignore patterns (e.g. 'node_modules', '*.log')")]
    ignore_patterns: Vec<String>,
    #[arg(
        long,
        env = "TREECOPY_MAX_OUTPUT_BYTES",
        help = "Ask before copying more than this many bytes"
    )]
    max_output_bytes: Option<u64>,
    #[arg(long, help = "Include files that look binary")]
    include_binary: bool,
    #[arg(long, help = "Descend into every top-level subdirectory without asking")]
    all_subdirs: bool,
    #[arg(short = 'y', long, help = "Copy oversized output without asking")]
    yes: bool,
    #[arg(long, value_enum)]
    to: Option<Target>,
    #[arg(short = 'o', long, help = "Export to this file")]
    output: Option<PathBuf>,
    #[arg(long, help = "Log the size of every copied file")]
    stats: bool,
}

async fn build_request(args: CopyArgs, mode: CopyMode) -> Result<CopyRequest> {
    let settings = match &args.settings {
        Some(path) => CopySettings::load(path).await?,
        None => CopySettings::default(),
    };
    let mut settings = settings.with_extra_ignores(&args.ignore_patterns);
    if let Some(max) = args.max_output_bytes {
        settings.max_output_bytes = max;
    }
    if args.include_binary {
        settings.skip_likely_binary = false;
    }

    let mut request = CopyRequest::new(args.dir, mode, settings);
    request.all_subdirs = args.all_subdirs;
    request.assume_yes = args.yes;
    request.stats = args.stats;
    request.destination = args.to.map(|t| match t {
        Target::Clipboard => Destination::Clipboard,
        Target::File => Destination::File,
    });
    request.output = args.output;
    Ok(request)
}

async fn run(args: CopyArgs, mode: CopyMode) -> Result<CopyOutcome> {
    let request = build_request(args, mode).await?;

    let cancel = CancellationFlag::new();
    let listener = cancel.clone();
    tokio::spawn(async move {
        let outcome =
            handle_interrupts(listener, || async { tokio::signal::ctrl_c().await.is_ok() }).await;
        if outcome == InterruptOutcome::ForceQuit {
            std::process::exit(130);
        }
    });

    copy_folder_contents(&request, InquirePrompter, &cancel).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli_args = CliArgs::parse();
    initialize_logger();

    let result = match cli_args.cmd {
        SubCommands::Recursive(args) => run(args, CopyMode::Recursive).await,
        SubCommands::TopLevel(args) => run(args, CopyMode::TopLevel).await,
    };

    match result {
        Ok(CopyOutcome::Delivered { bytes, files }) => {
            info!("Copied {} files ({} bytes).", files, bytes);
            ExitCode::SUCCESS
        }
        Ok(CopyOutcome::Declined) | Ok(CopyOutcome::NothingToCopy) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error copying folder contents: {}", e);
            ExitCode::FAILURE
        }
    }
}
