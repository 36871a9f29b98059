//! Unim Checker - Container freight tariff lookup
//!
//! A CLI tool that converts safe-trucking tariff workbooks into a single
//! queryable dataset and looks up fares by origin and destination.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
