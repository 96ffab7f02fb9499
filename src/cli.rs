use std::env;
use std::path::PathBuf;

pub struct CliOptions {
    pub request: PathBuf,
    pub config: Option<PathBuf>,
    pub preset: Option<String>,
    pub json: bool,
    pub projection_out: Option<PathBuf>,
    pub generation_out: Option<PathBuf>,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    if args.len() == 1 && (args[0] == "--help" || args[0] == "-h") {
        print_usage();
        std::process::exit(0);
    }
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut request = None;
    let mut config = None;
    let mut preset = None;
    let mut json = false;
    let mut projection_out = None;
    let mut generation_out = None;

    while i < args.len() {
        match args[i].as_str() {
            "--request" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --request (expected a TOML or JSON file path)",
                )?;
                if request.replace(PathBuf::from(path)).is_some() {
                    return Err("--request provided more than once".to_string());
                }
            }
            "--config" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --config (expected a TOML file path)")?;
                if config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name =
                    args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--json" => json = true,
            "--projection-out" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --projection-out (expected a file path)",
                )?;
                if projection_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--projection-out provided more than once".to_string());
                }
            }
            "--generation-out" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --generation-out (expected a file path)",
                )?;
                if generation_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--generation-out provided more than once".to_string());
                }
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    let request = request.ok_or_else(|| "missing required argument --request".to_string())?;

    if config.is_some() && preset.is_some() {
        return Err(
            "arguments `--config` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    Ok(CliOptions {
        request,
        config,
        preset,
        json,
        projection_out,
        generation_out,
    })
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("proposal-calc - solar, battery and electrification proposal calculator");
    eprintln!();
    eprintln!("Usage: proposal-calc --request <path> [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --request <path>          Customer, bills, providers and rebates (.toml or .json)");
    eprintln!("  --config <path>           Load assumptions from a TOML file");
    eprintln!("  --preset <name>           Use built-in assumptions (standard, conservative)");
    eprintln!("  --json                    Print the full result as JSON");
    eprintln!("  --projection-out <path>   Export the 25-year projection to CSV");
    eprintln!("  --generation-out <path>   Export the monthly generation profile to CSV");
    eprintln!("  --help                    Show this help message");
    eprintln!();
    eprintln!("If neither --config nor --preset is given, the standard preset is used.");
}
