use std::process::ExitCode;

use anyhow::Context;
use wall::{Wall, WallConfig};
use wall_engine::core::ApplicationState;
use wall_engine::device::GpuInit;
use wall_engine::logging::{init_logging, LoggingConfig};
use wall_engine::window::Runtime;

fn run() -> anyhow::Result<ApplicationState> {
    let settings = WallConfig::from_args(std::env::args()).context("failed to load configuration")?;

    init_logging(LoggingConfig {
        env_filter: settings.log_filter.clone(),
        ..Default::default()
    });

    let runtime = settings.runtime_config();
    Runtime::run(runtime, GpuInit::default(), Wall::new(settings))
}

fn main() -> ExitCode {
    match run() {
        Ok(ApplicationState::Finalized) => ExitCode::SUCCESS,
        Ok(state) => {
            log::error!("application ended in state {state}");
            ExitCode::FAILURE
        }
        Err(e) => {
            // The logger may not be up yet.
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
