use clap::Parser;
use ror_uta::cli::{self, output, Cli};

fn main() {
    if let Err(e) = cli::run(Cli::parse()) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
