//! `binsmart` terminal client.
//!
//! With an image argument, classifies it once and exits:
//! `0` for a confident result, `1` for a failure, `2` when the result was
//! withheld for low confidence. Without one, starts the interactive shell.

use binsmart::client::HttpClassifier;
use binsmart::input::{
    CaptureDevice, CommandDevice, CommandOutput, DialogFilePicker, DirectoryPreviewStore,
    InputAcquisition, UnavailableDevice,
};
use binsmart::runtime::{spawn_line_reader, Report, Runtime};
use binsmart::ui::components::render_result;
use binsmart::{infrastructure, observability, Config, Theme};
use clap::Parser;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{mpsc, Arc};
use std::time::Duration;

/// Prefix of environment variables that override configuration keys.
const ENV_PREFIX: &str = "BINSMART_";

#[derive(Parser, Debug)]
#[command(
    name = "binsmart",
    version,
    about = "Classify a photo of waste into the right disposal bin"
)]
struct Cli {
    #[arg(long, help = "Configuration file (default: <config dir>/binsmart/config.toml)")]
    config: Option<PathBuf>,
    #[arg(long, help = "Classification endpoint URL")]
    endpoint: Option<String>,
    #[arg(long, help = "Request timeout in seconds")]
    timeout: Option<u64>,
    #[arg(long, help = "Output machine-readable JSON (one-shot mode)")]
    json: bool,
    #[arg(long, help = "Disable ANSI colors")]
    no_color: bool,
    #[arg(help = "Image to classify once; omit for the interactive shell")]
    image: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("binsmart: {e}");
            return ExitCode::FAILURE;
        }
    };

    let log_file = observability::init_tracing(&config);
    tracing::debug!(?config, ?log_file, "configuration resolved");

    match run(&cli, &config) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "binsmart failed");
            eprintln!("binsmart: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> binsmart::Result<Config> {
    let env_overrides: BTreeMap<String, String> = std::env::vars()
        .filter_map(|(key, value)| {
            key.strip_prefix(ENV_PREFIX)
                .map(|name| (name.to_ascii_lowercase(), value))
        })
        .collect();

    let mut config = Config::load(cli.config.as_deref())?.merge_map(&env_overrides);

    if let Some(endpoint) = &cli.endpoint {
        config.endpoint.clone_from(endpoint);
    }
    if let Some(timeout) = cli.timeout {
        config.request_timeout_secs = timeout;
    }
    if cli.no_color {
        config.color = false;
    }
    Ok(config)
}

fn run(cli: &Cli, config: &Config) -> binsmart::Result<ExitCode> {
    let timeout = Duration::from_secs(config.request_timeout_secs);
    let classifier = HttpClassifier::new(config.endpoint.clone(), timeout)?;
    let previews = Arc::new(DirectoryPreviewStore::new(
        infrastructure::get_data_dir().join("previews"),
    ));
    let input = InputAcquisition::new(
        file_picker(&config.file_picker_command),
        camera(&config.camera_command),
        previews,
        config.max_image_bytes,
    );

    let (outbox, inbox) = mpsc::channel();
    let mut runtime = Runtime::new(input, Arc::new(classifier), outbox.clone())?;
    let theme = config.theme();

    if let Some(image) = cli.image.clone() {
        // Worker timeout plus slack so the client's own timeout fires first.
        let wait = timeout + Duration::from_secs(5);
        let report = runtime.classify_path(image, &inbox, wait)?;
        return print_report(&report, cli.json, &theme);
    }

    spawn_line_reader(io::BufReader::new(io::stdin()), outbox)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    runtime.run(&inbox, &theme, &mut out)?;
    writeln!(out)?;
    Ok(ExitCode::SUCCESS)
}

fn file_picker(argv: &[String]) -> Box<dyn CaptureDevice> {
    match CommandDevice::new(argv, CommandOutput::Path) {
        Some(device) => Box::new(device),
        None => Box::new(DialogFilePicker::default()),
    }
}

fn camera(argv: &[String]) -> Box<dyn CaptureDevice> {
    match CommandDevice::new(argv, CommandOutput::Bytes) {
        Some(device) => Box::new(device),
        None => Box::new(UnavailableDevice::new("no camera command configured")),
    }
}

fn print_report(report: &Report, json: bool, theme: &Theme) -> binsmart::Result<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(report)?)?;
    } else {
        match report {
            Report::Accepted { result } => render_result(&mut out, result, theme)?,
            Report::Rejected { advisory } => writeln!(out, "{advisory}")?,
            Report::Failed { message } => writeln!(out, "{message}")?,
        }
    }

    Ok(match report {
        Report::Accepted { .. } => ExitCode::SUCCESS,
        Report::Failed { .. } => ExitCode::FAILURE,
        Report::Rejected { .. } => ExitCode::from(2),
    })
}
