//! # sizing - command-line front end for sizing_core
//!
//! Reads a JSON calculation request, routes it through the standards
//! router and prints the result as JSON on stdout. Failures are printed as
//! structured JSON on stderr with a non-zero exit status.
//!
//! ```text
//! sizing calc --request request.json
//! echo '{"standard":"nec","kind":"conduit_fill",...}' | sizing calc --request -
//! sizing catalog --standard iec
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use sizing_core::catalog::{self, catalog_for};
use sizing_core::{CalcError, CalculationResult, EngineSettings, Router, Standard};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Exit status for requests the caller can fix
const EXIT_INPUT_ERROR: u8 = 2;
/// Exit status for loads no catalog entry can carry
const EXIT_NO_SOLUTION: u8 = 3;

#[derive(Parser, Debug)]
#[command(name = "sizing")]
#[command(version, about = "Multi-standard conductor, conduit and protective device sizing", long_about = None)]
struct Cli {
    /// Engine settings JSON; defaults apply when omitted
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Log filter (e.g. "debug", "sizing_core=debug")
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Route one calculation request
    Calc {
        /// Request JSON file, or "-" for stdin
        #[arg(short, long)]
        request: String,

        /// Print compact JSON
        #[arg(long)]
        compact: bool,

        /// Also print a human-readable breakdown on stderr
        #[arg(long)]
        explain: bool,
    },

    /// Print a standard's catalog: sizes, conduit types, device ladders
    Catalog {
        #[arg(short, long)]
        standard: String,
    },

    /// List supported standards
    Standards,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let settings = load_settings(cli.settings.as_deref())?;

    match cli.command {
        Commands::Calc {
            request,
            compact,
            explain,
        } => calc(settings, &request, compact, explain),
        Commands::Catalog { standard } => {
            let standard = Standard::from_str_flexible(&standard)
                .ok_or_else(|| anyhow!("unsupported standard '{}'", standard))?;
            print_json(&catalog_for(standard).summary(), false)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Standards => {
            let list: Vec<_> = Standard::ALL
                .iter()
                .map(|s| serde_json::json!({ "id": s.id(), "name": s.display_name(), "dc": s.is_dc() }))
                .collect();
            print_json(&list, false)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_settings(path: Option<&Path>) -> Result<EngineSettings> {
    let Some(path) = path else {
        return Ok(EngineSettings::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    EngineSettings::from_json(&json).with_context(|| format!("invalid settings in {}", path.display()))
}

fn read_request(source: &str) -> Result<String> {
    if source == "-" {
        let mut json = String::new();
        std::io::stdin()
            .read_to_string(&mut json)
            .context("failed to read request from stdin")?;
        Ok(json)
    } else {
        std::fs::read_to_string(source).with_context(|| format!("failed to read request file {}", source))
    }
}

fn calc(settings: EngineSettings, source: &str, compact: bool, explain: bool) -> Result<ExitCode> {
    let json = read_request(source)?;
    catalog::init();
    let router = Router::new(settings);

    match router.route_json(&json) {
        Ok(result) => {
            if !result.is_compliant() {
                tracing::warn!("selection is not fully compliant; see the compliance flags");
            }
            if explain {
                eprintln!("{}", explanation(&result));
            }
            print_json(&result, compact)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            report_error(&err)?;
            Ok(ExitCode::from(if err.is_input_error() {
                EXIT_INPUT_ERROR
            } else {
                EXIT_NO_SOLUTION
            }))
        }
    }
}

fn explanation(result: &CalculationResult) -> String {
    let (metadata, detail) = match result {
        CalculationResult::ConductorSizing(r) => (&r.calculation_metadata, r.correction.format_report()),
        CalculationResult::ConduitFill(r) => (
            &r.calculation_metadata,
            format!(
                "Required area {:.4} {} ({:.1} mm²) in {} {}",
                r.required_area,
                r.area_unit.symbol(),
                r.area_unit.to_mm2(r.required_area),
                r.conduit.conduit_type,
                r.conduit.size,
            ),
        ),
        CalculationResult::DeviceSizing(r) => (
            &r.calculation_metadata,
            format!("{} rated {:.0} A, {:.0} V max", r.device.name, r.device.rating, r.device.voltage_max),
        ),
    };
    format!(
        "{}\n{}\nApplied: {}",
        metadata.calculation_method,
        detail,
        metadata.sections_applied.join("; ")
    )
}

fn report_error(err: &CalcError) -> Result<()> {
    let body = serde_json::json!({
        "error_code": err.error_code(),
        "message": err.to_string(),
        "error": err,
    });
    eprintln!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T, compact: bool) -> Result<()> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", text);
    Ok(())
}
