use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use keycalc::calculator::{compile, evaluate_postfix, format_value, render_tokens};
use keycalc::config::Config;
use keycalc::session::{Calculator, Snapshot, parse_keys};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "keycalc", version, about = "A keypad calculator for the terminal")]
struct Args {
    /// Path to a config file (defaults to the per-user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the calculator state as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate an expression once, e.g. `keycalc eval "(2 + 3) x 4"`
    Eval {
        #[arg(required = true)]
        expression: Vec<String>,

        /// Also print the postfix form
        #[arg(long)]
        postfix: bool,
    },
    /// Press a sequence of keys, e.g. `keycalc keys 4 MS CE 5 MR`
    Keys {
        #[arg(required = true)]
        script: Vec<String>,
    },
    /// Read key scripts from stdin, one line at a time
    Repl,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;
    init_tracing(&config);

    match &args.command {
        Command::Eval {
            expression,
            postfix,
        } => run_eval(&expression.join(" "), *postfix, &config),
        Command::Keys { script } => run_keys(&script.join(" "), args.json, &config),
        Command::Repl => run_repl(args.json, &config),
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_eval(expression: &str, show_postfix: bool, config: &Config) -> Result<()> {
    let postfix = compile(expression)?;
    if show_postfix {
        println!("{}", render_tokens(&postfix));
    }
    let value = evaluate_postfix(&postfix)?;
    println!("{}", format_value(value, &config.display));
    Ok(())
}

fn run_keys(script: &str, json: bool, config: &Config) -> Result<()> {
    let mut calc = Calculator::new();
    for key in parse_keys(script)? {
        calc.press(key)
            .with_context(|| format!("key '{}' failed", key))?;
    }
    print_state(&calc.snapshot(), json, config)
}

fn run_repl(json: bool, config: &Config) -> Result<()> {
    let mut calc = Calculator::new();
    let stdin = std::io::stdin();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        let line = line.trim();
        if matches!(line, "quit" | "exit") {
            break;
        }
        if line.is_empty() {
            continue;
        }

        let keys = match parse_keys(line) {
            Ok(keys) => keys,
            Err(e) => {
                eprintln!("Error: {}", e);
                continue;
            }
        };

        for key in keys {
            if let Err(e) = calc.press(key) {
                eprintln!("Error: {}", e);
                break;
            }
        }
        print_state(&calc.snapshot(), json, config)?;
    }

    Ok(())
}

fn print_state(snapshot: &Snapshot, json: bool, config: &Config) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    if json {
        let text = serde_json::to_string(snapshot)?;
        writeln!(stdout, "{}", text)?;
    } else {
        writeln!(stdout, "{}", snapshot.status_line(&config.display))?;
    }
    Ok(())
}
