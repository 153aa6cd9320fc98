use clap::Parser;

/// Interactive register for building one invoice at a time.
///
/// Commands are read from standard input, one per line: new, add item,
/// remove item, status, scrap, done, exit.
#[derive(Parser)]
#[clap(version)]
pub struct Opts {}
