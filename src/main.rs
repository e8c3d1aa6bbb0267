// Author: Dustin Pilgrim
// License: MIT

mod app;
mod cli;
mod config;
mod core;
mod daemon;
mod services;

use std::process::ExitCode;

use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = cli::Args::parse();

    let res = if args.command.is_some() {
        app::command::run(args).await
    } else {
        app::daemon_mode::run(args).await
    };

    // The only place a fatal error reaches the terminal.
    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("restwatch: {e}");
            ExitCode::FAILURE
        }
    }
}
