use clap::Parser;
use mealdesk_console::cli::{Cli, run};
use mealdesk_console::logger::init_logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. .env before argument parsing so env-backed flags see it
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // 2. Logging; the guard flushes the log file on exit
    let _guard = init_logger(&cli.log_level, cli.log_dir.as_deref())?;

    // 3. Run the page action
    match run(cli).await {
        Ok(output) => {
            print!("{}", output);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Command failed: {:#}", e);
            Err(e)
        }
    }
}
