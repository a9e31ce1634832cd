//! bigsh - shell for arbitrary-precision integer commands
//!
//! Usage:
//!   bigsh                       # Interactive REPL
//!   bigsh script.big            # Run a script, stop at the first error
//!   bigsh -e '** 2 100'         # Evaluate and print, repeatable
//!
//! REPL commands:
//!   :quit, :q                   # Exit
//!   :help                       # Show help

use bignum_runtime::BigValue;
use bignum_shell::{Config, Host, HostError};
use clap::Parser as ClapParser;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

#[derive(ClapParser)]
#[command(name = "bigsh")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Shell for arbitrary-precision integer commands")]
#[command(long_about = None)]
struct Args {
    /// Script to run, one command per line
    script: Option<PathBuf>,

    /// Evaluate a command line and print its result (may be repeated)
    #[arg(short, long, value_name = "CMD")]
    eval: Vec<String>,

    /// Path to configuration file (TOML)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for `rand`, overriding the configured one
    #[arg(long)]
    seed: Option<String>,

    /// Largest result in bits, overriding the configured ceiling
    #[arg(long, value_name = "BITS")]
    max_bits: Option<u64>,
}

fn main() {
    let args = Args::parse();

    let mut config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    if let Some(seed) = args.seed {
        config.runtime.seed = Some(seed);
    }
    if let Some(max_bits) = args.max_bits {
        config.runtime.max_bits = max_bits;
    }

    if let Err(e) = init_logging(&config.shell.log_filter) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
    info!(max_bits = config.runtime.max_bits, "starting bigsh");

    let mut host = Host::new(&config.runtime, io::stdout());

    let result = if !args.eval.is_empty() {
        run_eval(&mut host, &args.eval)
    } else if let Some(path) = &args.script {
        run_script(&mut host, path)
    } else {
        repl_loop(&mut host, &config);
        Ok(())
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(filter: &str) -> Result<(), HostError> {
    let directive = filter
        .parse::<Directive>()
        .map_err(|e| HostError::Config(format!("Invalid log filter \"{}\": {}", filter, e)))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn run_eval(host: &mut Host<Stdout>, lines: &[String]) -> Result<(), HostError> {
    for line in lines {
        print_result(host.eval_line(line)?)?;
    }
    Ok(())
}

fn run_script(host: &mut Host<Stdout>, path: &Path) -> Result<(), HostError> {
    let source = std::fs::read_to_string(path).map_err(|e| {
        HostError::Io(io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })?;
    host.run_script(&source)
}

fn print_result(value: Option<BigValue>) -> Result<(), HostError> {
    if let Some(mut value) = value {
        let text = value.get_text()?;
        if !text.is_empty() {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", text)?;
        }
    }
    Ok(())
}

fn repl_loop(host: &mut Host<Stdout>, config: &Config) {
    let mut rl = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Error initializing readline: {}", e);
            process::exit(1);
        }
    };

    let history_file = config.shell.history.as_deref();
    if let Some(path) = history_file {
        let _ = rl.load_history(path);
    }

    println!(
        "bigsh {}. Type :help for commands, :quit to exit.",
        env!("CARGO_PKG_VERSION")
    );

    loop {
        match rl.readline(&config.shell.prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                match line {
                    ":quit" | ":q" => break,
                    ":help" => print_help(),
                    _ => {
                        if let Err(e) = host.eval_line(line).and_then(print_result) {
                            eprintln!("error: {}", e);
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        }
    }

    if let Some(path) = history_file
        && let Err(e) = rl.save_history(path)
    {
        eprintln!(
            "Warning: could not save history to {}: {}",
            path.display(),
            e
        );
    }
}

fn print_help() {
    println!("Commands:");
    println!("  + - * / %            variadic arithmetic");
    println!("  > >= < <= == !=      comparison (two operands, yields 1 or 0)");
    println!("  ** base exp ?mod?    power, optionally modular");
    println!("  rand ?atoms?         random value below 2^(32*atoms)");
    println!("  srand seed           reseed the random source");
    println!("  set name ?value?     read or assign a variable");
    println!("  unset name           remove a variable");
    println!("  puts value           print a value");
    println!();
    println!("Words: \"quoted text\", $variable, [nested command]");
    println!("REPL:  :help, :quit");
}
