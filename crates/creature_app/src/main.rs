mod platform;

use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(platform::config::DEFAULT_CONFIG_FILE));

    match platform::run_app(&config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("creature_app: {err}");
            ExitCode::FAILURE
        }
    }
}
