use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use rsv::pipeline::{compute_provenance, run_pipeline, ValidationState};
use rsv::pass::{descriptor, PassId};
use rsv::Verdict;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "rsv",
    version,
    about = "RobotScript validator — static semantic checks for multi-robot city programs"
)]
struct Cli {
    /// Input AST document (JSON emitted by the RobotScript parser)
    ast: PathBuf,

    /// Verdict format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print passes and timing
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    log::debug!("ast = {}", cli.ast.display());

    // ── Load ──
    let program = match rsv::load::from_path(&cli.ast) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("rsv: internal error: {}", e);
            return ExitCode::from(2);
        }
    };

    log::debug!(
        "loaded program '{}': {} areas, {} robot types, {} instances, {} procedures",
        program.name.identifier,
        program.areas.len(),
        program.robot_types.len(),
        program.instances.len(),
        program.procedures.len()
    );

    // ── Validate ──
    let mut state = ValidationState::new(&program);
    let verdict = match run_pipeline(&mut state, PassId::RobotTypes, |_, _| {}) {
        Ok(()) => Verdict::Valid,
        Err(e) => {
            log::debug!("rejected by pass '{}'", descriptor(e.failing_pass).name);
            Verdict::Invalid(e.diagnostic)
        }
    };

    log::info!(
        "program '{}': {}",
        program.name.identifier,
        if verdict.is_error() { "invalid" } else { "valid" }
    );

    // ── Report ──
    match cli.format {
        OutputFormat::Text => match verdict.diagnostic() {
            None => println!("program '{}': ok", program.name.identifier),
            Some(d) => eprintln!("{}", d),
        },
        OutputFormat::Json => {
            let provenance = match compute_provenance(&program) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("rsv: internal error: {}", e);
                    return ExitCode::from(2);
                }
            };
            let report = serde_json::json!({
                "program": program.name.identifier,
                "verdict": verdict,
                "provenance": provenance.to_json_value(),
            });
            match serde_json::to_string_pretty(&report) {
                Ok(s) => println!("{}", s),
                Err(e) => {
                    eprintln!("rsv: internal error: {}", e);
                    return ExitCode::from(2);
                }
            }
        }
    }

    if verdict.is_error() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
