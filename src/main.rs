//! Gokoban release packager.
//!
//! Builds the game and packages it into `gokoban-<os>-<version>.zip`, exiting
//! nonzero with the failing stage named if anything goes wrong.

use gokoban_release::cli::{self, OutputManager};
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            // errors are shown even in quiet mode
            let _ = OutputManager::new(false, false).error(&e.to_string());
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
