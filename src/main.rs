use anyhow::{Context, Result};
use clap::Parser;
use scrobbler_log::scrobbler::{DurationPolicy, TimestampMode};
use scrobbler_log::{parse_log_file, ParseOptions, ScrobbleLog};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scrobbler-log")]
#[command(about = "Parse a portable player .scrobbler.log file", long_about = None)]
struct Args {
    /// Path to the log file (e.g. /media/PLAYER/.scrobbler.log)
    log: String,

    /// Device clock timezone (IANA name), used when the log says #TZ/UNKNOWN
    #[arg(short = 't', long)]
    timezone: Option<String>,

    /// Treat start times as true UTC Unix timestamps rather than device wall-clock seconds
    #[arg(long)]
    epoch_timestamps: bool,

    /// Reject lines whose duration is not a whole number of seconds
    #[arg(long)]
    strict_duration: bool,

    /// Print the parsed log as JSON
    #[arg(long)]
    json: bool,

    /// Only print the summary, not every track
    #[arg(short = 's', long)]
    summary: bool,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut options = ParseOptions::new();
    if let Some(ref name) = args.timezone {
        options = options.with_timezone_name(name)?;
    }
    if args.epoch_timestamps {
        options = options.with_timestamp_mode(TimestampMode::Epoch);
    }
    if args.strict_duration {
        options = options.with_duration_policy(DurationPolicy::Strict);
    }

    // Expand ~ in path
    let log_path = PathBuf::from(shellexpand::tilde(&args.log).as_ref());

    let log = parse_log_file(&log_path, &options)
        .with_context(|| format!("Failed to parse scrobbler log {:?}", log_path))?;

    if args.json {
        let json = serde_json::to_string_pretty(&log).context("Failed to serialize log")?;
        println!("{}", json);
        return Ok(());
    }

    if !args.summary {
        print_tracks(&log);
    }
    print_summary(&log);

    Ok(())
}

fn print_tracks(log: &ScrobbleLog) {
    println!("{:>4} | {:<20} | {} | Artist - Track", "#", "Listened (UTC)", "S");
    println!("{}", "-".repeat(80));

    for (i, play) in log.records().iter().enumerate() {
        println!(
            "{:4} | {:<20} | {} | {} - {}",
            i + 1,
            play.listened_at.format("%Y-%m-%d %H:%M:%S"),
            if play.skipped { "S" } else { "L" },
            play.artist,
            play.track
        );
    }
    println!();
}

fn print_summary(log: &ScrobbleLog) {
    let stats = log.stats();
    let total = stats.total_duration_secs;

    println!("Client:   {}", log.client());
    println!("Format:   {}", log.version());
    println!("Timezone: {}", log.timezone);
    println!(
        "Tracks:   {} ({} played, {} skipped)",
        stats.total_tracks, stats.played, stats.skipped
    );
    println!(
        "Duration: {}h {:02}m {:02}s",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    );
}
