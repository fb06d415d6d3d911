use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::{Builder, Env};
use log::{debug, info};
use memmap2::Mmap;

use treelox as lox;

use lox::ast_printer::AstPrinter;
use lox::interpreter::Interpreter;
use lox::parser::Parser;
use lox::scanner::{scan_tokens, Scanner};
use lox::{Diagnostics, Lox, LoxError, RunError};

#[derive(ClapParser, Debug)]
#[command(version, about = "Tree-walking Lox interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to treelox.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Print the token list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parses a file as a program and prints its AST
    Parse {
        filename: PathBuf,

        /// Print the statement list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluates a file as a single expression and prints the result
    Evaluate { filename: PathBuf },

    /// Runs a file as a Lox program, or starts a REPL without one
    Run { filename: Option<PathBuf> },
}

/// Maps a source file and copies it out as UTF‑8 text.
fn read_source(filename: &Path) -> Result<String> {
    info!("Reading file: {:?}", filename);

    let file = File::open(filename).with_context(|| format!("Failed to open file {:?}", filename))?;

    let len = file
        .metadata()
        .with_context(|| format!("Failed to stat file {:?}", filename))?
        .len();

    // Zero-length mappings are rejected on some platforms.
    if len == 0 {
        return Ok(String::new());
    }

    // SAFETY: the mapping is read-only and dropped before this function
    // returns; the text is copied out first.
    let mmap = unsafe { Mmap::map(&file) }.with_context(|| format!("Failed to map file {:?}", filename))?;

    let text = std::str::from_utf8(&mmap)
        .map_err(LoxError::from)
        .with_context(|| format!("{:?} is not valid UTF-8", filename))?;

    info!("Read {} bytes from {:?}", len, filename);

    Ok(text.to_owned())
}

fn init_logger() -> Result<()> {
    let log_file = File::create("treelox.log").context("Failed to create treelox.log")?;

    // Debug by default, RUST_LOG overrides.
    Builder::from_env(Env::default().default_filter_or("debug"))
        .format(|buf, record| {
            let module = record.module_path().unwrap_or("<unnamed>");
            let module = module.strip_prefix("treelox::").unwrap_or(module);
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    info!("Logger initialized, writing to treelox.log");
    Ok(())
}

fn report_all(errors: &[LoxError]) {
    for e in errors {
        eprintln!("{}", e);
    }
}

fn report(err: &RunError) {
    match err {
        RunError::Static(errors) => report_all(errors),
        RunError::Runtime(e) => eprintln!("{}", e),
    }
}

fn tokenize(filename: &Path, json: bool) -> Result<i32> {
    let source = read_source(filename)?;
    let mut tokens = Vec::new();
    let mut tokenized = true;

    for result in Scanner::new(&source) {
        match result {
            Ok(token) => {
                if !json {
                    println!("{}", token);
                }
                tokens.push(token);
            }
            Err(e) => {
                tokenized = false;
                eprintln!("{}", e);
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    }

    Ok(if tokenized { 0 } else { 65 })
}

fn parse(filename: &Path, json: bool) -> Result<i32> {
    let source = read_source(filename)?;
    let mut diagnostics = Diagnostics::new();
    let tokens = scan_tokens(&source, &mut diagnostics);
    let statements = Parser::new(&tokens, &mut diagnostics).parse();

    if diagnostics.had_error() {
        report_all(diagnostics.errors());
        return Ok(65);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&statements)?);
    } else {
        for stmt in &statements {
            println!("{}", AstPrinter::print_stmt(stmt));
        }
    }

    Ok(0)
}

fn evaluate(filename: &Path) -> Result<i32> {
    let source = read_source(filename)?;
    let mut diagnostics = Diagnostics::new();
    let tokens = scan_tokens(&source, &mut diagnostics);
    let expr = Parser::new(&tokens, &mut diagnostics).parse_expression();

    let expr = match expr {
        Some(expr) if !diagnostics.had_error() => expr,
        _ => {
            report_all(diagnostics.errors());
            return Ok(65);
        }
    };

    match Interpreter::new().evaluate(&expr) {
        Ok(value) => {
            println!("{}", value);
            Ok(0)
        }
        Err(e) => {
            eprintln!("{}", e);
            Ok(70)
        }
    }
}

fn run_file(filename: &Path) -> Result<i32> {
    let source = read_source(filename)?;
    let mut lox = Lox::new();

    match lox.run(&source) {
        Ok(()) => {
            info!("Program executed successfully");
            Ok(0)
        }
        Err(e) => {
            debug!("Run failed: {:?}", e);
            report(&e);
            Ok(e.exit_code())
        }
    }
}

fn run_prompt() -> Result<i32> {
    let mut lox = Lox::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;

        // Errors are reported and the session carries on.
        if let Err(e) = lox.run(&line) {
            report(&e);
        }
    }

    Ok(0)
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    }

    info!("CLI arguments: {:?}", args);

    let code = match &args.commands {
        Commands::Tokenize { filename, json } => tokenize(filename, *json)?,
        Commands::Parse { filename, json } => parse(filename, *json)?,
        Commands::Evaluate { filename } => evaluate(filename)?,
        Commands::Run {
            filename: Some(filename),
        } => run_file(filename)?,
        Commands::Run { filename: None } => run_prompt()?,
    };

    if code != 0 {
        debug!("Exiting with code {}", code);
        std::process::exit(code);
    }

    Ok(())
}
