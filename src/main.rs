use std::process::ExitCode;

use clap::Parser;

use pawhaven::cli::{self, Cli};
use pawhaven::logging::init_tracing;

fn main() -> ExitCode {
    let args = Cli::parse();

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(cli::EXIT_ERROR);
        }
    };
    init_tracing(&config.logging.level);

    match cli::run(args, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(cli::EXIT_ERROR)
        }
    }
}
