use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match tracker_image::cli::Cli::parse().run() {
        Ok(exit_code) => ExitCode::from(exit_code),
        Err(error) => {
            const BOLD_RED: &str = "\x1b[1;31m";
            const BOLD: &str = "\x1b[1m";
            const RESET: &str = "\x1b[0m";
            eprintln!("{BOLD_RED}error{RESET}{BOLD}:{RESET} {error}");
            ExitCode::from(tracker_image::cli::exit_code(&*error))
        }
    }
}
