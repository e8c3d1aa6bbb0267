// Author: Dustin Pilgrim
// License: MIT

pub mod action;
pub mod config;
pub mod error;
pub mod monitor;
pub mod state;
pub mod utils;

#[cfg(test)]
mod monitor_tests;
