//! Ordo - dependency-aware task ordering

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = ordo::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::from(ordo::cli::exit_code(&e))
    } else {
        ExitCode::SUCCESS
    }
}
