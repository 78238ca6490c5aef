use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
};

use clap::Parser;
use log::{LevelFilter, warn};
use shuntcalc::{evaluate, interpreter::tokenizer::format_tokens, postfix};

const EXIT_COMMAND: &str = "exit";

/// shuntcalc evaluates arithmetic expressions with `+ - * / ^`, parentheses
/// and the functions `sin`, `cos`, `tan` and `sqrt`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Skips the welcome banner of the interactive prompt.
    #[arg(short, long)]
    quiet: bool,

    /// Number of decimals printed for each result.
    #[arg(short, long, default_value_t = 6)]
    precision: usize,

    /// Also prints the postfix form of every expression.
    #[arg(long)]
    postfix: bool,

    /// Raises the log level; repeat for more detail. `RUST_LOG` overrides it.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Expressions to evaluate. Starts the interactive prompt when empty.
    expressions: Vec<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.expressions.is_empty() {
        run_prompt(&args);
        return ExitCode::SUCCESS;
    }

    let mut failed = false;
    for expression in &args.expressions {
        failed |= !report(expression, &args);
    }

    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new().filter_level(level)
                              .parse_default_env()
                              .init();
}

/// Reads expressions from standard input until `exit` or end of input.
fn run_prompt(args: &Args) {
    if !args.quiet {
        print_banner();
    }

    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        print!("Enter calculation: ");
        if let Err(e) = io::stdout().flush() {
            warn!("failed to flush the prompt: {e}");
        }

        input.clear();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {},
            Err(e) => {
                println!("Error reading input: {e}");
                continue;
            },
        }

        let line = input.trim();
        if line.eq_ignore_ascii_case(EXIT_COMMAND) {
            println!("Exiting the calculator. Goodbye!");
            break;
        }

        if !report(line, args) {
            println!("Please check your input and try again.");
        }
    }
}

/// Evaluates one expression and prints the outcome. Returns whether it
/// succeeded.
fn report(expression: &str, args: &Args) -> bool {
    if args.postfix
       && let Ok(tokens) = postfix(expression)
    {
        println!("Postfix: {}", format_tokens(&tokens));
    }

    match evaluate(expression) {
        Ok(value) => {
            println!("Result: {value:.precision$}", precision = args.precision);
            true
        },
        Err(e) => {
            println!("Error: {e}");
            false
        },
    }
}

fn print_banner() {
    println!("Welcome to shuntcalc!");
    println!("Enter a calculation with as many operations as you like, including parentheses.");
    println!("Operators: + for addition, - for subtraction, * for multiplication, / for division, ^ for exponentiation");
    println!("Functions: sin(x), cos(x), tan(x), sqrt(x)");
    println!("Type '{EXIT_COMMAND}' to quit the program.");
}
