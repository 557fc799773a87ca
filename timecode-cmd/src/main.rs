mod describe;

use std::io::{stderr, stdout, Write};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use clap::{ArgAction, Parser, Subcommand};
use timecode::Variant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Increase logging verbosity; may be repeated. Ignored if TC_LOG is set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Defaults to encoding the current time as tc8.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Encode a time as a timecode.
    Encode {
        #[arg(short = 't', long, default_value_t = Variant::Tc8)]
        variant: Variant,

        /// `now`, an RFC3339 timestamp, or a minute precision timestamp like
        /// 2024-06-09T02:16Z.
        #[arg(value_parser = parse_timespec, value_name = "timespec")]
        time: Option<DateTime<Utc>>,
    },
    /// Decode a timecode, printing the interval it covers.
    Decode {
        #[arg(short = 't', long, default_value_t = Variant::Tc8)]
        variant: Variant,

        /// Print the midpoint of the interval as an RFC3339 timestamp instead.
        #[arg(short, long, action)]
        midpoint: bool,

        code: String,
    },
    /// Show the fields of a timecode.
    Describe {
        #[arg(short = 't', long, default_value_t = Variant::Tc8)]
        variant: Variant,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: describe::Format,

        code: String,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Encode {
            variant: Variant::default(),
            time: None,
        }
    }
}

fn parse_timespec(s: &str) -> Result<DateTime<Utc>, String> {
    if s.eq_ignore_ascii_case("now") {
        return Ok(Utc::now());
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%MZ")
        .map(|t| t.and_utc())
        .map_err(|_| format!("{s:?} is not `now`, RFC3339, or YYYY-MM-DDTHH:MMZ"))
}

fn run<W: Write>(command: &Commands, out: &mut W) -> Result<()> {
    match command {
        Commands::Encode { variant, time } => {
            let t = time.unwrap_or_else(Utc::now);
            info!("encoding {t:?} as {variant}");
            let code = variant
                .encode(&t)
                .with_context(|| format!("encoding {t} as {variant}"))?;
            writeln!(out, "{code}").context("writing to stdout")
        }
        Commands::Decode {
            variant,
            midpoint,
            code,
        } => {
            let decoded = variant
                .decode(code)
                .with_context(|| format!("decoding {code:?} as {variant}"))?;
            debug!("{decoded:?}");
            let line = if *midpoint {
                decoded
                    .midpoint()
                    .to_rfc3339_opts(SecondsFormat::AutoSi, true)
            } else {
                decoded.summary()
            };
            writeln!(out, "{line}").context("writing to stdout")
        }
        Commands::Describe {
            variant,
            format,
            code,
        } => describe::describe(*variant, code, format, out),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(stderr)
        .with_ansi(false)
        .without_time()
        .with_env_filter(
            EnvFilter::try_from_env("TC_LOG").unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();

    debug!(
        "{} {} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("GIT_SHA")
    );

    run(&cli.command.unwrap_or_default(), &mut stdout().lock())
}
