// Author: Dustin Pilgrim
// License: MIT

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::config::Backend;

#[derive(Parser, Debug)]
#[command(
    name = "restwatch",
    version = env!("CARGO_PKG_VERSION"),
    about = "Reminds you to rest after long stretches at the keyboard"
)]
pub struct Args {
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long, action)]
    pub verbose: bool,

    /// Idle source; overrides the config file
    #[arg(long, value_enum)]
    pub backend: Option<BackendArg>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "Sample idle time once, print it and exit")]
    Check,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendArg {
    Auto,
    X11,
    Wayland,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Auto => Backend::Auto,
            BackendArg::X11 => Backend::X11,
            BackendArg::Wayland => Backend::Wayland,
        }
    }
}
