//! Runs the user's command through the retry engine

use crate::args::Cli;
use reattempt_config::ConfigLoader;
use reattempt_core::Failure;
use reattempt_utils::resilience::retry;
use std::io;
use tokio::process::Command;

/// Exit code reported when the command was terminated by a signal
const SIGNALLED_EXIT_CODE: i32 = 128;

/// Run the command once, returning its exit code
async fn run_once(program: &str, args: &[String]) -> io::Result<i32> {
    let status = Command::new(program).args(args).status().await?;
    Ok(status.code().unwrap_or(SIGNALLED_EXIT_CODE))
}

/// Retry the command and return the exit code for this process
pub async fn execute(cli: Cli) -> eyre::Result<i32> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.file(path);
    }
    let settings = loader.load()?.overlay(cli.flag_settings());

    let success_code = cli.until_exit;
    let options = settings
        .to_options::<i32>()
        .until(move |code| *code == success_code);

    let (program, args) = cli
        .command
        .split_first()
        .ok_or_else(|| eyre::eyre!("no command given"))?;

    tracing::info!(command = %program, times = ?settings.times, "running command");

    let err = match retry(|| run_once(program, args), options).await {
        Ok(_) => return Ok(0),
        Err(err) => err,
    };

    if let Failure::UntilMismatch(mismatch) = err.cause() {
        let last_code = mismatch.result;
        eprintln!("reattempt: {err}: '{program}' last exited with {last_code}");
        return Ok(exit_code_for(last_code));
    }

    Err(err.into())
}

/// The command's own exit code, unless that code would read as success
fn exit_code_for(last_code: i32) -> i32 {
    if last_code == 0 {
        1
    } else {
        last_code
    }
}
