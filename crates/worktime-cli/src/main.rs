//! Command-line front end for the `worktime` conversions.
//!
//! Every subcommand that resolves bare clock times accepts `--timezone` and
//! `--now`, so invocations can be anchored to a fixed reference moment. This
//! is the only place in the workspace that reads the system clock, and only
//! when `--now` is absent.

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "worktime",
    version,
    about = "Convert work-time notations to and from second counts"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a duration ("1h15m") or clock interval ("11:00-13:00") into seconds
    Parse {
        /// The expression to parse
        expression: String,
        #[command(flatten)]
        anchor: AnchorArgs,
        /// Emit the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render a second count as a duration string
    Duration {
        /// Second count; negative values render with a leading '-'
        #[arg(allow_negative_numbers = true)]
        seconds: i64,
        /// Prefix positive values with '+'
        #[arg(long)]
        plus: bool,
    },
    /// Render a second count as a clock interval anchored at a start time
    Interval {
        /// Second count, must be non-negative
        #[arg(allow_negative_numbers = true)]
        seconds: i64,
        /// Start time in HH:MM:SS
        start: String,
        #[command(flatten)]
        anchor: AnchorArgs,
        /// Emit the result as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Flags that pin the reference moment bare clock times resolve against.
#[derive(Args)]
struct AnchorArgs {
    /// IANA timezone for resolving bare clock times
    #[arg(long, default_value = "UTC")]
    timezone: String,
    /// Fixed reference moment (RFC 3339); defaults to the current time
    #[arg(long)]
    now: Option<String>,
}

impl AnchorArgs {
    fn resolve(&self) -> Result<DateTime<Tz>> {
        let tz: Tz = self
            .timezone
            .parse()
            .map_err(|_| anyhow!("invalid timezone '{}'", self.timezone))?;
        let instant = match &self.now {
            Some(text) => DateTime::parse_from_rfc3339(text)
                .with_context(|| format!("invalid --now value '{text}'"))?
                .with_timezone(&Utc),
            None => Utc::now(),
        };
        Ok(instant.with_timezone(&tz))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Parse {
            expression,
            anchor,
            json,
        } => {
            let reference = anchor.resolve()?;
            let Some(result) = worktime::parse(&expression, &reference) else {
                bail!("unparseable expression '{expression}'");
            };
            if json {
                println!("{}", serde_json::to_string(&result)?);
            } else {
                match &result.start_time {
                    Some(start) => println!("{}s starting {start}", result.seconds),
                    None => println!("{}s", result.seconds),
                }
            }
        }
        Command::Duration { seconds, plus } => {
            let rendered = if plus {
                worktime::to_duration_signed(seconds)
            } else {
                worktime::to_duration(seconds)
            };
            println!("{rendered}");
        }
        Command::Interval {
            seconds,
            start,
            anchor,
            json,
        } => {
            let reference = anchor.resolve()?;
            let Some(interval) = worktime::to_interval(seconds, &start, &reference) else {
                bail!("cannot render {seconds}s starting at '{start}'");
            };
            if json {
                println!("{}", serde_json::to_string(&interval)?);
            } else {
                println!("{}-{}", interval.start_time, interval.end_time);
            }
        }
    }

    Ok(())
}
