use anyhow::Result;
use std::io::Write;

use tender_launcher::cli::Cli;
use tender_launcher::config::Settings;
use tender_launcher::launcher::{LaunchMode, Launcher};

#[tokio::main]
async fn main() {
    tender_launcher::logging::init();

    let cli = Cli::from_env();

    let code = match launch(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            1
        }
    };

    let _ = std::io::stdout().flush();
    std::process::exit(code);
}

async fn launch(cli: Cli) -> Result<i32> {
    let settings = Settings::from_env()?;
    // Only the interactive UI is reachable from here
    let launcher = Launcher::new(settings, LaunchMode::InteractiveOnly);

    let code = launcher
        .run(cli, &mut std::io::stdout(), &mut std::io::stderr())
        .await?;

    Ok(code)
}
