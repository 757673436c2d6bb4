use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    process,
};

use clap::Parser;
use colored::Colorize;
use videoinfo::{FfmpegLogLevel, InspectError, MediaFile, error::EXIT_FAILURE, report};

const USAGE: &str = "Usage: videoinfo <path/to/video>";

#[derive(Debug, Parser)]
#[command(
    name = "videoinfo",
    version,
    about = "Print container, duration, bitrate, and stream details of a media file",
    after_help = "Exit status:\n  0  success (or no path given)\n  1  invalid arguments\n  2  the file could not be opened\n  3  stream information could not be read"
)]
struct Cli {
    /// Media file to inspect.
    path: Option<PathBuf>,

    /// Print the summary as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Show debug logging on stderr.
    #[arg(long)]
    verbose: bool,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long, default_value_t = FfmpegLogLevel::Error)]
    log_level: FfmpegLogLevel,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "warn,videoinfo=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn run(path: &Path, json: bool) -> Result<(), InspectError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !json {
        report::write_path_line(&mut out, path)?;
        out.flush()?;
    }

    let info = MediaFile::open(path)?.info();

    if json {
        serde_json::to_writer_pretty(&mut out, &report::to_json(path, &info))
            .map_err(io::Error::from)?;
        writeln!(out)?;
    } else {
        report::write_summary(&mut out, &info)?;
    }
    out.flush()?;
    Ok(())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            process::exit(if error.use_stderr() { EXIT_FAILURE } else { 0 });
        }
    };

    init_logging(cli.verbose);
    videoinfo::set_ffmpeg_log_level(cli.log_level);

    let Some(path) = cli.path else {
        println!("{USAGE}");
        return;
    };

    if let Err(error) = run(&path, cli.json) {
        eprintln!("{} {error}", "error:".red().bold());
        process::exit(error.exit_code());
    }
}
