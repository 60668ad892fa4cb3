//! CLI entry point for anatomical segmentation

use anatseg::command::SystemExecutor;
use anatseg::io::cli::{Application, Cli};
use anatseg::io::logging::init_tracing;
use clap::Parser;
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match Application::new(cli).run(&SystemExecutor::new()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            let mut source = error.source();
            while let Some(cause) = source {
                tracing::error!("caused by: {cause}");
                source = cause.source();
            }

            // Child exit codes pass through; everything else is a plain failure
            let code = error
                .exit_status()
                .and_then(|status| u8::try_from(status).ok())
                .filter(|&code| code != 0)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
