//! Command runners for serve, convert and index

use std::env;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::warn;

use crate::application::ports::{ConfigStore, Library, Transcoder};
use crate::application::{RegenerateIndexUseCase, SubmitError, SubmitInput, SubmitSettings};
use crate::domain::audio::TargetFormat;
use crate::domain::config::{AppConfig, TranscoderConfig};
use crate::infrastructure::{
    FfmpegTranscoder, FsLibrary, FsScratchSpace, SystemClock, XdgConfigStore,
};
use crate::server::{self, AppState, ServerSubmitUseCase};

use super::args::LibraryArgs;
use super::presenter::Presenter;
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment overrides
pub const ENV_BIND: &str = "AUDIO_DEPOT_BIND";
pub const ENV_ROOT: &str = "AUDIO_DEPOT_ROOT";
pub const ENV_TRANSCODER: &str = "AUDIO_DEPOT_TRANSCODER";

/// Translate shared library flags into a partial config
pub fn library_args_config(args: &LibraryArgs) -> Result<AppConfig, String> {
    let format = match args.format.as_deref() {
        Some(raw) => Some(
            raw.parse::<TargetFormat>()
                .map_err(|e| e.to_string())?
                .to_string(),
        ),
        None => None,
    };

    let transcoder = if args.transcoder.is_some() || format.is_some() {
        Some(TranscoderConfig {
            program: args.transcoder.clone(),
            format,
            quality: None,
        })
    } else {
        None
    };

    Ok(AppConfig {
        library_root: args.root.clone(),
        transcoder,
        ..Default::default()
    })
}

/// Read the environment overrides into a partial config
pub fn env_config() -> AppConfig {
    let var = |name: &str| env::var(name).ok().filter(|s| !s.is_empty());

    AppConfig {
        bind: var(ENV_BIND),
        library_root: var(ENV_ROOT),
        transcoder: var(ENV_TRANSCODER).map(|program| TranscoderConfig {
            program: Some(program),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %store.path().display(), error = %e, "ignoring unreadable config file");
            AppConfig::empty()
        }
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}

/// Wire the filesystem adapters and the ffmpeg transcoder into a submit use case
pub fn build_submit_use_case(config: &AppConfig) -> ServerSubmitUseCase {
    let transcoder: Box<dyn Transcoder> = Box::new(
        FfmpegTranscoder::with_program(config.transcoder_program_or_default())
            .quality(config.quality_or_default()),
    );
    let library = FsLibrary::new(config.library_root_or_default());
    let scratch = FsScratchSpace::new(config.scratch_dir_or_default())
        .keep_files(config.keep_scratch_or_default());

    ServerSubmitUseCase::new(
        transcoder,
        library,
        scratch,
        SystemClock,
        submit_settings(config),
    )
}

fn submit_settings(config: &AppConfig) -> SubmitSettings {
    SubmitSettings {
        target: config.target_format_or_default(),
        index_on_submit: config.index_on_submit_or_default(),
        index_file: config.index_file_or_default().to_string(),
    }
}

/// Run the HTTP service until SIGINT/SIGTERM
pub async fn run_serve(config: AppConfig) -> ExitCode {
    let presenter = Presenter::new();

    let shutdown = ShutdownSignal::new();
    if let Err(e) = shutdown.setup() {
        presenter.error(&format!("Failed to setup signal handler: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    let bind = config.bind_or_default().to_string();
    let listener = match TcpListener::bind(&bind).await {
        Ok(listener) => listener,
        Err(e) => {
            presenter.error(&format!("Failed to bind {}: {}", bind, e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let use_case = build_submit_use_case(&config);
    presenter.info(&format!("Library: {}", use_case.library().root().display()));
    let state = Arc::new(AppState::new(use_case, config.max_upload_bytes()));

    match server::serve(listener, server::router(state), shutdown.wait()).await {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            presenter.error(&format!("Server error: {}", e));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Convert one local file into the library
pub async fn run_convert(file: &Path, project: String, config: AppConfig) -> ExitCode {
    let mut presenter = Presenter::new();

    let bytes = match tokio::fs::read(file).await {
        Ok(bytes) => bytes,
        Err(e) => {
            presenter.error(&format!("Cannot read {}: {}", file.display(), e));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let input = SubmitInput {
        file_bytes: Some(bytes),
        original_filename: file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned()),
        project_label: Some(project),
    };

    let use_case = build_submit_use_case(&config);
    presenter.start_spinner(&format!("Converting {}...", file.display()));

    match use_case.execute(input).await {
        Ok(output) => {
            let size = presenter.format_size(output.size_bytes);
            presenter.spinner_success(&format!("Converted ({})", size));
            if let Some(index_path) = &output.index_path {
                presenter.info(&format!("Index updated: {}", index_path.display()));
            }
            presenter.output(&output.output_path.to_string());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.spinner_fail("Conversion failed");
            presenter.error(&e.to_string());
            match e {
                SubmitError::InvalidInput(_) => ExitCode::from(EXIT_USAGE_ERROR),
                _ => ExitCode::from(EXIT_ERROR),
            }
        }
    }
}

/// Print the listing, optionally replacing the index file
pub async fn run_index(write: bool, config: AppConfig) -> ExitCode {
    let presenter = Presenter::new();
    let use_case = RegenerateIndexUseCase::new(
        FsLibrary::new(config.library_root_or_default()),
        config.target_format_or_default(),
        config.index_file_or_default(),
    );

    let result = if write {
        use_case.execute_and_write().await.map(|out| {
            presenter.success(&format!("Index written to {}", out.index_path.display()));
            out.document
        })
    } else {
        use_case.execute().await
    };

    match result {
        Ok(document) => {
            presenter.info(&presenter.library_summary(
                document.file_count(),
                document.projects().len(),
            ));
            presenter.output(document.to_markdown().trim_end());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}
