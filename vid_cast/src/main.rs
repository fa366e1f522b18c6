use clap::{CommandFactory, Parser};
use shared_utils::{report_error, run_batch, BatchResult, CastError, CliRunnerConfig, InterruptFlag};
use std::process::ExitCode;
use tracing::{info, warn};

use vid_cast::{expand_args, CastConfig, FfmpegTranscoder, MediaInfoProbe, Processor};

#[derive(Parser)]
#[command(name = "vid-cast")]
#[command(version, about = "Chromecast compatibility checker and converter", long_about = None)]
#[command(override_usage = "vid-cast [--mp4 | --mkv] <PATH>...")]
struct Cli {
    /// Files or directories. `--mp4` / `--mkv` force the output container
    /// for every path that follows.
    #[arg(value_name = "PATH", allow_hyphen_values = true, trailing_var_arg = true)]
    args: Vec<String>,
}

const EXIT_INTERRUPTED: u8 = 130;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.args.is_empty() {
        eprintln!("{}", Cli::command().render_usage());
        return ExitCode::FAILURE;
    }

    let config = match CastConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = shared_utils::logging::init_logging("vid_cast", config.log.clone()) {
        eprintln!("⚠️  Could not initialize logging: {:#}", e);
    }

    match run(&config, &cli.args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            if matches!(e, CastError::Interrupted) {
                warn!("🛑 Interrupted, stopping");
            } else {
                report_error(&e);
            }
            ExitCode::from(exit_status(&e))
        }
    }
}

/// 130 for Ctrl-C (shell convention for SIGINT), 1 for anything else.
fn exit_status(error: &CastError) -> u8 {
    match error {
        CastError::Interrupted => EXIT_INTERRUPTED,
        _ => 1,
    }
}

fn run(config: &CastConfig, args: &[String]) -> shared_utils::Result<BatchResult> {
    let probe = MediaInfoProbe::locate()?;
    let transcoder = FfmpegTranscoder::locate()?;
    info!(
        "🔧 Probe: {} | Transcoder: {}",
        probe.tool().path.display(),
        transcoder.tool().path.display()
    );

    let registry = config.load_registry()?;
    let ledger = config.open_ledger()?;
    info!("📒 Ledger: {} ({} entries)", ledger.path().display(), ledger.len());

    let interrupt = InterruptFlag::new();
    if let Err(e) = interrupt.install() {
        warn!("⚠️  Could not install Ctrl-C handler: {:#}", e);
    }

    let items = expand_args(args);
    let mut processor = Processor::new(registry, ledger, &probe, &transcoder);

    run_batch(
        &CliRunnerConfig {
            label: "Chromecast".to_string(),
            print_report: true,
        },
        items,
        &interrupt,
        |path, container_override| processor.process_file(path, *container_override),
    )
}
