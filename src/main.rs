// src/main.rs

use buzzerd::{cli, logging, run};

#[tokio::main]
async fn main() {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("buzzerd error: {err:?}");
        std::process::exit(buzzerd::errors::exit_code::FATAL);
    }

    if let Err(err) = run(args).await {
        eprintln!("buzzerd error: {err}");
        std::process::exit(err.exit_code());
    }
}
