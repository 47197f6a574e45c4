//! Cellgrid - headless host for the spreadsheet engine.
//!
//! Applies cell edits given on the command line, then prints the requested
//! display values, raw texts, or the whole populated table.

mod config;
mod logging;

use anyhow::Context;
use cellgrid_core::Document;
use std::env;
use std::path::PathBuf;

fn print_usage() {
    eprintln!("Usage: cellgrid [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --set <REF=TEXT>      Set a cell's raw text (can be repeated)");
    eprintln!("  -p, --print <REF>         Print a cell's display value (can be repeated)");
    eprintln!("  -r, --raw <REF>           Print a cell's raw text (can be repeated)");
    eprintln!("  -t, --table               Print every populated cell as a table");
    eprintln!("  --config <FILE>           Load configuration from FILE");
    eprintln!("  --no-config               Ignore the default configuration file");
    eprintln!("  -v, --verbose             Log at debug level");
    eprintln!("  -h, --help                Print help");
}

/// Something to print once every edit has been applied.
enum Output {
    Display(String),
    Raw(String),
}

#[derive(Default)]
struct Options {
    assignments: Vec<String>,
    outputs: Vec<Output>,
    table: bool,
    config_file: Option<PathBuf>,
    no_config: bool,
    verbose: bool,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut opts = Options::default();

    let mut i = 1;
    while i < args.len() {
        let arg = args[i].as_str();
        let needs_value = matches!(
            arg,
            "-s" | "--set" | "-p" | "--print" | "-r" | "--raw" | "--config"
        );
        if needs_value && i + 1 >= args.len() {
            eprintln!("Error: {} requires a value", arg);
            std::process::exit(1);
        }
        match arg {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "-s" | "--set" => {
                i += 1;
                opts.assignments.push(args[i].clone());
            }
            "-p" | "--print" => {
                i += 1;
                opts.outputs.push(Output::Display(args[i].clone()));
            }
            "-r" | "--raw" => {
                i += 1;
                opts.outputs.push(Output::Raw(args[i].clone()));
            }
            "--config" => {
                i += 1;
                opts.config_file = Some(PathBuf::from(&args[i]));
            }
            "-t" | "--table" => opts.table = true,
            "--no-config" => opts.no_config = true,
            "-v" | "--verbose" => opts.verbose = true,
            other => {
                eprintln!("Error: Unknown argument: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if let Err(e) = run(&opts) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(opts: &Options) -> anyhow::Result<()> {
    let config = if opts.no_config && opts.config_file.is_none() {
        config::Config::default()
    } else {
        config::load(opts.config_file.as_deref()).context("failed to load configuration")?
    };
    let level = if opts.verbose {
        log::LevelFilter::Debug
    } else {
        config.log_level
    };
    logging::init(level);

    let mut doc = Document::new();
    for assignment in &opts.assignments {
        doc.apply_assignment(assignment)
            .with_context(|| format!("cannot apply --set {}", assignment))?;
    }

    for output in &opts.outputs {
        match output {
            Output::Display(token) => println!("{}", doc.display(token)?),
            Output::Raw(token) => println!("{}", doc.raw(token)?),
        }
    }

    if opts.table {
        print!("{}", doc.render_table(&config.table_separator)?);
    }
    Ok(())
}
