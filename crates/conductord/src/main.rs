use std::io::{self, Write};
use std::process::ExitCode;

use tracing::error;

fn main() -> ExitCode {
    match conductord::run_console() {
        Ok(()) => ExitCode::SUCCESS,
        Err(launch_error) => {
            error!(target: "conductord::process", error = %launch_error, "console failed");
            let _ = writeln!(io::stderr().lock(), "conductord: {launch_error}");
            ExitCode::FAILURE
        }
    }
}
