use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use wd_core::cli::{self, Cli};
use wd_core::ExitCode;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli::run(&cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            error!(code = err.code(), "check failed: {err}");
            // Monitoring consumers still get a parseable line on stdout.
            println!("UNKNOWN - {err}");
            std::process::exit(ExitCode::Unknown.as_i32());
        }
    }
}

/// Logs go to stderr; stdout belongs to the check output.
fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
