use clap::Parser;
use td_probe::bootstrap::tracing::init_tracing_subscriber;
use td_probe::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_subscriber(cli.verbose, cli.log_dir.as_deref())?;

    let report = td_probe::run(&cli).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
