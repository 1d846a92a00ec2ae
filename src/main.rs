use clap::Parser;
use log::LevelFilter;
use snafu::ErrorCompat;

mod args;
mod deck;

use crate::args::Args;

fn main() {
    let args = Args::parse();

    let mut log_builder = env_logger::Builder::from_default_env();
    if args.verbose {
        log_builder.filter_level(LevelFilter::Debug);
    }
    log_builder.init();

    if let Err(e) = deck::run_generation(&args) {
        eprintln!("An error occurred: {}", e);
        if let Some(bt) = ErrorCompat::backtrace(e.as_ref()) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
