// Entrypoint for the CLI application.
// - With an IMAGE argument: upload it once, save the archive, exit.
// - Without: start the interactive menu.

use clap::Parser;
use codegen_cli::{ui, ApiClient, Config};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "codegen-cli", version, about = "Turn a UI design image into a React project")]
struct Cli {
    /// Image to upload. Omit to start the interactive menu.
    image: Option<PathBuf>,

    /// Base URL of the generation service (overrides CODEGEN_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Directory to save generated-ui.zip into (overrides CODEGEN_OUTPUT_DIR)
    #[arg(long, short = 'o')]
    output_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the menus on stdout.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "codegen_cli=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().with_overrides(cli.api_url, cli.output_dir);
    tracing::debug!(?config, "configuration loaded");

    let api = ApiClient::from_config(&config)?;
    tracing::debug!(api_url = api.base_url(), "client ready");

    match cli.image {
        Some(image) => {
            let saved = ui::run_once(&api, &config, &image)?;
            println!("{}", saved.display());
        }
        None => ui::main_menu(&api, &config)?,
    }
    Ok(())
}
