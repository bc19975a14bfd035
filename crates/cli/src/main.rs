use clap::Parser;

mod args;
mod execute;

use args::Cli;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    reattempt_utils::tracing::init_with_default(cli.log_directive())
        .map_err(|e| eyre::eyre!("failed to initialize logging: {e}"))?;

    let code = execute::execute(cli).await?;
    std::process::exit(code);
}
