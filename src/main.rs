use clap::Parser;
use java_config::cli::{usage_text, Cli, CommandHandler};
use java_config::core::constants::exit_code;
use java_config::infrastructure::logging::init_logging;
use std::io;
use std::process;

fn main() {
    init_logging();

    let cli = Cli::parse();
    if cli.flags.is_empty() {
        eprint!("{}", usage_text());
        process::exit(exit_code::USAGE);
    }

    let handler = match CommandHandler::new() {
        Ok(handler) => handler,
        Err(e) => {
            eprintln!("{e}");
            process::exit(exit_code::FAILURE);
        }
    };

    let output = match handler.handle(&cli.reports()) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("{e}");
            process::exit(exit_code::FAILURE);
        }
    };

    if let Err(e) = output.flush_to(&mut io::stdout().lock()) {
        eprintln!("{e}");
        process::exit(exit_code::FAILURE);
    }
}
