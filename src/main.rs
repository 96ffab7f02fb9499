//! Proposal calculator entry point: CLI wiring, config loading and output.

mod cli;

use std::process;

use proposal_calc::config::EngineConfig;
use proposal_calc::engine::generate_full_calculations;
use proposal_calc::io::export::{export_generation_csv, export_projection_csv};
use proposal_calc::request::CalculationRequest;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = match cli::parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };

    // Assumptions: --config takes priority, then --preset, then standard
    let config = if let Some(ref path) = cli.config {
        EngineConfig::from_toml_file(path)
    } else if let Some(ref name) = cli.preset {
        EngineConfig::from_preset(name)
    } else {
        Ok(EngineConfig::standard())
    };
    let config = match config {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let request = match CalculationRequest::from_path(&cli.request) {
        Ok(req) => req,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let proposal = match generate_full_calculations(&request, &config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: calculation failed: {e}");
            process::exit(1);
        }
    };

    if cli.json {
        match proposal.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize proposal: {e}");
                process::exit(1);
            }
        }
    } else {
        println!("{proposal}");
    }

    if let Some(ref path) = cli.projection_out {
        if let Err(e) = export_projection_csv(&proposal.projection, path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Projection written to {}", path.display());
    }

    if let Some(ref path) = cli.generation_out {
        if let Err(e) = export_generation_csv(&proposal.generation_profile.monthly, path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Generation profile written to {}", path.display());
    }
}
