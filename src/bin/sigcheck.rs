#![allow(clippy::print_stderr)]

use clap::Parser;
use std::io::{IsTerminal, Write};

use sigcheck::cli::args::CliArgs;
use sigcheck::cli::driver::{self, EXIT_USAGE_ERROR};

fn main() {
    // Only active when SIGCHECK_LOG or RUST_LOG is set.
    sigcheck::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let stdout = std::io::stdout();
    let color = !args.no_color && stdout.is_terminal();
    let mut out = stdout.lock();

    let code = match driver::run(&args, color, &mut out) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            EXIT_USAGE_ERROR
        }
    };
    let _ = out.flush();
    std::process::exit(code);
}
