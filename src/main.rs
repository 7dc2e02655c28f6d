use codemap::cli::{run, Args};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse_args();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
