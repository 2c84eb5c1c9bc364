//! audio-depot CLI entry point

use std::process::ExitCode;

use clap::Parser;

use audio_depot::cli::{
    app::{library_args_config, load_merged_config, run_convert, run_index, run_serve},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    EXIT_ERROR, EXIT_USAGE_ERROR,
};
use audio_depot::domain::config::AppConfig;
use audio_depot::infrastructure::XdgConfigStore;
use audio_depot::logging;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    logging::init(if cli.verbose { "debug" } else { "info" }, cli.log_json);

    // Config management never needs the merged config
    let (library_args, bind) = match &cli.command {
        Commands::Config { .. } => (None, None),
        Commands::Serve { bind, library } => (Some(library), bind.clone()),
        Commands::Convert { library, .. } | Commands::Index { library, .. } => {
            (Some(library), None)
        }
    };

    let config = match library_args {
        Some(args) => {
            let cli_config = match library_args_config(args) {
                Ok(config) => AppConfig { bind, ..config },
                Err(e) => {
                    presenter.error(&e);
                    return ExitCode::from(EXIT_USAGE_ERROR);
                }
            };
            load_merged_config(cli_config).await
        }
        None => AppConfig::empty(),
    };

    match cli.command {
        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Commands::Serve { .. } => run_serve(config).await,
        Commands::Convert { file, project, .. } => run_convert(&file, project, config).await,
        Commands::Index { write, .. } => run_index(write, config).await,
    }
}
