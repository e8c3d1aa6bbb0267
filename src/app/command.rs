// Author: Dustin Pilgrim
// License: MIT

use crate::cli::{Args, Command};
use crate::core::utils::{format_duration, ms_to_secs};
use crate::services::idle;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

pub async fn run(args: Args) -> Result<(), AnyError> {
    super::daemon_mode::init_logging(args.verbose).await;

    let Some(cmd) = args.command.clone() else {
        return Ok(());
    };

    match cmd {
        Command::Check => {
            let cfg = super::daemon_mode::load_config(&args).map_err(|e| format!("{e:#}"))?;

            let mut sampler = idle::open_sampler(cfg.backend, &cfg.thresholds)?;
            let idle_ms = sampler.sample()?;
            let t = &cfg.thresholds;

            println!("backend:        {}", sampler.name());
            println!("idle:           {}", describe_idle(idle_ms, sampler.rounds_down()));
            println!("poll period:    {}", format_duration(t.poll_secs()));
            println!("rest threshold: {}", format_duration(t.rest_secs()));
            println!("work threshold: {}", format_duration(t.work_secs()));
            println!("reminders:      {}", cfg.reminder_policy);
            Ok(())
        }
    }
}

fn describe_idle(idle_ms: u64, rounds_down: bool) -> String {
    let exact = format!("{} ms ({})", idle_ms, format_duration(ms_to_secs(idle_ms)));
    if rounds_down {
        format!("at least {exact}")
    } else {
        exact
    }
}
