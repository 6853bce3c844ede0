//! Command line entry point for the headless exporter.

use inkpage_app::{ExportArgs, USAGE, run};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let args = match ExportArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("usage: {}", USAGE);
            return ExitCode::from(2);
        }
    };

    // Dated like browser downloads: UTC calendar day.
    let date = chrono::Utc::now().format("%Y-%m-%d").to_string();
    match run(&args, &date) {
        Ok(written) => {
            for path in written {
                println!("{}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Export failed: {}", e);
            eprintln!("Export failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
