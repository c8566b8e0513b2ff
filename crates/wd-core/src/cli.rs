//! Command-line interface for evaluating a Defender status dump.

use std::io::Read;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{ArgAction, Parser};
use tracing::info;
use wd_common::{DateFormat, Error, OutputFormat, Result};
use wd_config::CheckParams;

use crate::check::check_defender;
use crate::collect::{parse_section, split_section, DEFAULT_SEPARATOR};
use crate::exit_codes::ExitCode;
use crate::output;

/// Evaluate a Windows Defender status dump against thresholds.
#[derive(Debug, Parser)]
#[command(name = "wd-core", version, about)]
pub struct Cli {
    /// Agent section dump to read ("-" for stdin)
    #[arg(default_value = "-")]
    pub input: String,

    /// Field separator of the agent section (a `sep(NN)` header overrides it)
    #[arg(short, long, default_value_t = DEFAULT_SEPARATOR)]
    pub separator: char,

    /// Check-parameter file (JSON); missing fields keep shipped defaults
    #[arg(short, long, value_name = "FILE")]
    pub params: Option<PathBuf>,

    /// Override the parameter file's date format
    #[arg(long, value_enum)]
    pub date_format: Option<DateFormat>,

    /// Output rendering
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Evaluation time "YYYY-MM-DD HH:MM:SS" instead of wall clock,
    /// for reproducible runs
    #[arg(long, value_name = "TIMESTAMP")]
    pub now: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// One full parse-and-evaluate pass. Returns the exit code carrying the
/// overall state; errors are left to the caller to map onto `Unknown`.
pub fn run(cli: &Cli) -> Result<ExitCode> {
    let text = read_input(&cli.input)?;
    let (rows, sep) = split_section(&text, cli.separator);

    let mut params = match &cli.params {
        Some(path) => CheckParams::load_from_file(path)?,
        None => CheckParams::default(),
    };
    if let Some(format) = cli.date_format {
        params.date_format = format;
    }

    let now = match &cli.now {
        Some(raw) => parse_now(raw)?,
        None => chrono::Local::now().naive_local(),
    };

    let section = parse_section(&rows, sep).ok_or(Error::NoData)?;
    let findings = check_defender(&section, &params, now);
    let state = output::overall(&findings);
    info!(findings = findings.len(), overall = %state, "evaluation complete");

    match cli.output {
        OutputFormat::Text => println!("{}", output::render_text(&findings)),
        OutputFormat::Json => println!("{}", output::render_json(&findings)?),
    }

    Ok(state.into())
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(input)?)
    }
}

fn parse_now(raw: &str) -> Result<NaiveDateTime> {
    for layout in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw.trim(), layout) {
            return Ok(parsed);
        }
    }
    Err(Error::Config(format!(
        "invalid --now timestamp {raw:?}, expected YYYY-MM-DD HH:MM:SS"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_accepts_both_iso_shapes() {
        assert!(parse_now("2021-02-28 22:37:08").is_ok());
        assert!(parse_now("2021-02-28T22:37:08").is_ok());
    }

    #[test]
    fn now_rejects_locale_shapes() {
        let err = parse_now("25.02.2021 22:37:08").unwrap_err();
        assert_eq!(err.code(), 10);
    }

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["wd-core"]);
        assert_eq!(cli.input, "-");
        assert_eq!(cli.separator, ':');
        assert_eq!(cli.output, OutputFormat::Text);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn cli_parses_overrides() {
        let cli = Cli::parse_from([
            "wd-core",
            "dump.txt",
            "--separator",
            "|",
            "--date-format",
            "iso",
            "--output",
            "json",
            "-vv",
        ]);
        assert_eq!(cli.input, "dump.txt");
        assert_eq!(cli.separator, '|');
        assert_eq!(cli.date_format, Some(DateFormat::Iso));
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
    }
}
