use std::env;
use std::io;

use tracing::{debug, info};

use crate::input::{
    check_sweep_budget, load_parameters, parameters_from_args, InputError, PARAMS_PATH_ENV,
};
use crate::optimizer::{optimize_with_scenarios, sweep_budgets};
use crate::output::{write_sweep_csv, OptimizationPayload};
use crate::parallel::WorkerPool;
use crate::stats::StatParameters;

const USAGE: &str = "usage: critalloc <optimize|sweep|damage> [K I F S CR0 CD0 | --params <file.json>]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Optimize,
    Sweep,
    Damage,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("optimize") => Some(Command::Optimize),
        Some("sweep") => Some(Command::Sweep),
        Some("damage") => Some(Command::Damage),
        _ => None,
    }
}

/// Flags shared by every command, with positional arguments split out.
#[derive(Debug, Clone, Default, PartialEq)]
struct Options {
    positionals: Vec<String>,
    params_path: Option<String>,
    all: bool,
    csv: bool,
    workers: usize,
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--all" => options.all = true,
            "--csv" => options.csv = true,
            "--params" => {
                let path = iter.next().ok_or("--params requires a path")?;
                options.params_path = Some(path.clone());
            }
            "--workers" => {
                let raw = iter.next().ok_or("--workers requires a count")?;
                options.workers = raw
                    .parse::<usize>()
                    .map_err(|_| format!("invalid worker count '{raw}'"))?;
            }
            _ => options.positionals.push(arg.clone()),
        }
    }
    Ok(options)
}

/// Parameters from `--params`, then positionals, then `CRITALLOC_PARAMS`.
fn resolve_parameters(
    params_path: Option<&str>,
    positionals: &[String],
) -> Option<Result<StatParameters, InputError>> {
    if let Some(path) = params_path {
        return Some(load_parameters(path));
    }
    if !positionals.is_empty() {
        return Some(parameters_from_args(positionals));
    }
    let path = env::var(PARAMS_PATH_ENV).ok()?;
    debug!(path = %path, "loading parameters from {PARAMS_PATH_ENV}");
    Some(load_parameters(path))
}

pub fn run_with_args(args: &[String]) -> i32 {
    let Some(command) = parse_command(args) else {
        eprintln!("{USAGE}");
        return 2;
    };
    let options = match parse_options(&args[2..]) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("{msg}");
            return 2;
        }
    };
    match command {
        Command::Optimize => handle_optimize(&options),
        Command::Sweep => handle_sweep(&options),
        Command::Damage => handle_damage(&options),
    }
}

fn parameters_or_exit_code(
    params_path: Option<&str>,
    positionals: &[String],
) -> Result<StatParameters, i32> {
    match resolve_parameters(params_path, positionals) {
        Some(Ok(params)) => Ok(params),
        Some(Err(err)) => {
            eprintln!("invalid input: {err}");
            Err(1)
        }
        None => {
            eprintln!("{USAGE}");
            Err(2)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize result: {err}");
            1
        }
    }
}

fn handle_optimize(options: &Options) -> i32 {
    let params = match parameters_or_exit_code(options.params_path.as_deref(), &options.positionals)
    {
        Ok(params) => params,
        Err(code) => return code,
    };

    info!(budget = params.budget, "optimizing build");
    match optimize_with_scenarios(&params) {
        Ok(report) if options.all => print_json(&report),
        Ok(report) => print_json(&OptimizationPayload::Found(report.best)),
        Err(err) => {
            print_json(&OptimizationPayload::failed(&err));
            1
        }
    }
}

fn handle_sweep(options: &Options) -> i32 {
    let params = match parameters_or_exit_code(options.params_path.as_deref(), &options.positionals)
    {
        Ok(params) => params,
        Err(code) => return code,
    };

    if let Err(err) = check_sweep_budget(params.budget) {
        eprintln!("invalid input: {err}");
        return 1;
    }

    let pool = WorkerPool::with_workers(options.workers);
    let entries = match sweep_budgets(&params, 0..=params.budget, &pool) {
        Ok(entries) => entries,
        Err(err) => {
            eprintln!("sweep failed: {err}");
            return 1;
        }
    };

    info!(budgets = entries.len(), workers = options.workers, "sweep finished");

    if options.csv {
        return match write_sweep_csv(io::stdout().lock(), &entries) {
            Ok(()) => 0,
            Err(err) => {
                eprintln!("failed to write csv: {err}");
                1
            }
        };
    }

    let payloads: Vec<serde_json::Value> = entries
        .iter()
        .map(|entry| {
            serde_json::json!({
                "S": entry.budget,
                "best": OptimizationPayload::from(&entry.result),
            })
        })
        .collect();
    print_json(&payloads)
}

fn handle_damage(options: &Options) -> i32 {
    let usage = "usage: critalloc damage <x> <y> <z> [K I F S CR0 CD0 | --params <file.json>]";
    if options.positionals.len() < 3 {
        eprintln!("{usage}");
        return 2;
    }
    let mut point = [0_i64; 3];
    for (slot, raw) in point.iter_mut().zip(options.positionals.iter()) {
        match raw.parse::<i64>() {
            Ok(value) => *slot = value,
            Err(_) => {
                eprintln!("invalid point count '{raw}'");
                return 1;
            }
        }
    }

    let params =
        match parameters_or_exit_code(options.params_path.as_deref(), &options.positionals[3..]) {
            Ok(params) => params,
            Err(code) => return code,
        };

    let [x, y, z] = point;
    print_json(&serde_json::json!({
        "x": x,
        "y": y,
        "z": z,
        "damage": params.damage_at(x, y, z),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_known_commands() {
        assert_eq!(
            parse_command(&strings(&["critalloc", "optimize"])),
            Some(Command::Optimize)
        );
        assert_eq!(
            parse_command(&strings(&["critalloc", "sweep"])),
            Some(Command::Sweep)
        );
        assert_eq!(parse_command(&strings(&["critalloc", "serve"])), None);
        assert_eq!(parse_command(&strings(&["critalloc"])), None);
    }

    #[test]
    fn options_split_flags_from_positionals() {
        let options =
            parse_options(&strings(&["1000", "--all", "60", "--workers", "4", "--csv"]))
                .expect("valid flags");
        assert_eq!(options.positionals, strings(&["1000", "60"]));
        assert!(options.all);
        assert!(options.csv);
        assert_eq!(options.workers, 4);
    }

    #[test]
    fn flag_without_value_is_rejected() {
        assert!(parse_options(&strings(&["--params"])).is_err());
        assert!(parse_options(&strings(&["--workers", "many"])).is_err());
    }
}
