//! Tally CLI
//!
//! Evaluates arithmetic expressions over named scalars and arrays.

use std::process::ExitCode;

use tallyc::commands::{
    collect_symbols, eval_expression, evaluate_batch, format_symbols, format_tokens,
    parse_batch_args, parse_eval_args, CommandError,
};
use tallyc::reporting::{render_anomaly, render_error};

fn main() -> ExitCode {
    tallyc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::SUCCESS;
    }

    let command = &args[1];
    let rest = &args[2..];

    let result = match command.as_str() {
        "eval" => run_eval(rest),
        "symbols" => run_symbols(rest),
        "lex" => {
            if rest.is_empty() {
                eprintln!("Usage: tally lex <expr>");
                return ExitCode::FAILURE;
            }
            print!("{}", format_tokens(&rest.join(" ")));
            Ok(true)
        }
        "batch" => run_batch(rest),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(true)
        }
        "version" | "--version" | "-V" => {
            println!("tally {}", env!("CARGO_PKG_VERSION"));
            Ok(true)
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            report(command, &err);
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when something was reported but the command ran.
type CommandResult = Result<bool, CommandError>;

fn run_eval(args: &[String]) -> CommandResult {
    let (expr, options) = parse_eval_args(args)?;
    let output = eval_expression(&expr, &options)?;

    for anomaly in &output.evaluation.anomalies {
        eprint!("{}", render_anomaly(&output.source, anomaly));
    }
    println!("{}", output.evaluation.value);
    Ok(true)
}

fn run_symbols(args: &[String]) -> CommandResult {
    let (expr, options) = parse_eval_args(args)?;
    let output = collect_symbols(&expr, options.values.as_deref())?;

    for name in &output.skipped {
        eprintln!("warning: `{name}` is not used by the expression");
    }
    print!("{}", format_symbols(&output.table));
    Ok(true)
}

fn run_batch(args: &[String]) -> CommandResult {
    let (path, options) = parse_batch_args(args)?;
    let lines = evaluate_batch(&path, &options)?;

    let mut ok = true;
    for line in &lines {
        match &line.result {
            Ok(evaluation) => {
                for anomaly in &evaluation.anomalies {
                    eprintln!("line {}:", line.line);
                    eprint!("{}", render_anomaly(&line.source, anomaly));
                }
                println!("{}", evaluation.value);
            }
            Err(error) => {
                ok = false;
                eprintln!("line {}:", line.line);
                eprint!("{}", render_error(&line.source, error));
                println!("error");
            }
        }
    }
    Ok(ok)
}

fn report(command: &str, err: &CommandError) {
    match err {
        CommandError::Eval { expr, error } => eprint!("{}", render_error(expr, error)),
        CommandError::Usage(message) => {
            eprintln!("error: {message}");
            eprintln!("Run `tally help` for usage of `tally {command}`.");
        }
        other => eprintln!("error: {other}"),
    }
}

fn print_usage() {
    println!("Tally - arithmetic over named scalars and arrays");
    println!();
    println!("Usage: tally <command> [options]");
    println!();
    println!("Commands:");
    println!("  eval <expr>          Evaluate an expression and print its value");
    println!("  symbols <expr>       List the scalars and arrays an expression uses");
    println!("  lex <expr>           Tokenize and display tokens");
    println!("  batch <file>         Evaluate one expression per line of <file>");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Eval options:");
    println!("  --values=<file>     Values table (one symbol per line)");
    println!("  --strict-index      Fail on out-of-range subscripts instead of reading 0");
    println!();
    println!("Batch options:");
    println!("  --values=<file>     Values table shared by every line (required)");
    println!("  --strict-index      Fail on out-of-range subscripts instead of reading 0");
    println!("  --no-parallel       Evaluate lines sequentially");
    println!();
    println!("Values table:");
    println!("  x 5                         scalar `x`");
    println!("  a 3 (0,10) (2,30)           array `a` of length 3; unset elements are 0");
    println!("  Names the expression uses but the table omits evaluate as 0.");
    println!();
    println!("Environment:");
    println!("  TALLY_LOG=<filter>  Enable logging (e.g. tally_eval=trace); falls back to RUST_LOG");
    println!("  TALLY_LOG_TREE=1    Indent log output by evaluation depth");
    println!();
    println!("Examples:");
    println!("  tally eval '2+3*4'");
    println!("  tally eval 'a[b[0]-4]*x' --values=values.txt");
    println!("  tally symbols 'a[i]+x'");
    println!("  tally batch exprs.txt --values=values.txt --strict-index");
}
