use human_panic::{metadata, setup_panic};
use linergen::ISSUES_URL;
use linergen::cli::run_cli;
use linergen::log::is_logger_initialised;
use log::error;

fn main() {
    setup_panic!(metadata!().support(format!("Open an issue on Github: {ISSUES_URL}/new")));

    if let Err(err) = run_cli() {
        if is_logger_initialised() {
            error!("{err:?}");
        } else {
            eprintln!("Error: {err:?}");
        }

        // Terminate program, signalling an error
        std::process::exit(1);
    }
}
