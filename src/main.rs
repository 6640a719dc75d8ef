//! jsondb - a tiny file-backed document store

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = jsondb::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
