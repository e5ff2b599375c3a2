// src/main.rs

use buildwatch::console::{Reporter, Severity, TerminalReporter};
use buildwatch::{cli, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        TerminalReporter::default().report(Severity::Error, &format!("{err:#}"));
        std::process::exit(1);
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await?;
    Ok(())
}
