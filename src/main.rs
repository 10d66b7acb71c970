//! jekyll-docker - run Jekyll in a container without a local Ruby toolchain.
//!
//! Parses the subcommand, runs it, and maps any error to the process exit
//! code after logging it.

use std::process;

#[tokio::main]
async fn main() {
    let exit_code = match jekyll_docker::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
