/*
 * Invoice register
 *
 * One invoice is worked on at a time:
 *  - new starts an invoice
 *  - add item / remove item edit its line items
 *  - status shows it as a ruled table with a grand total
 *  - done prints it and closes it, scrap throws it away
 *  - exit asks first if an invoice is still open
 *
 * Diagnostics go to stderr through env_logger (RUST_LOG), the operator
 * dialogue stays on stdout.
 */

use std::io;
use std::process::ExitCode;

use clap::Parser;
use env_logger::{Env, Target};

use register::cli::Opts;
use register::input::Console;
use register::run::Register;

fn main() -> ExitCode {
    Opts::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Stderr)
        .init();

    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());
    let mut register = Register::new();

    if let Err(error) = register.run(&mut console) {
        log::warn!("Register stopped: {}", error);
        if console.error(&error.to_string()).is_err() {
            eprintln!("{}", error);
        }
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
