//! Demo binary: parses a single SQL-99 `SELECT` statement and prints its
//! AST (or the parse error) to stdout. Not part of the library's public
//! interface — a thin, separately compiled way to exercise it by hand.

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser as ClapParser, ValueEnum};

#[derive(ClapParser)]
#[command(name = "sqlparse", about = "Parse a SQL-99 SELECT statement and print its AST")]
struct Args {
    /// Read the statement from this file instead of stdin.
    #[arg(long)]
    file: Option<PathBuf>,

    /// How to render the parsed AST.
    #[arg(long, value_enum, default_value_t = Format::Debug)]
    format: Format,

    /// The statement itself, if not reading from --file or stdin.
    statement: Option<String>,
}

#[derive(Copy, Clone, ValueEnum)]
enum Format {
    Debug,
    Json,
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let sql = match read_input(&args) {
        Ok(sql) => sql,
        Err(err) => {
            eprintln!("error reading input: {err}");
            std::process::exit(2);
        }
    };

    match sql99_parser::parse_statement(&sql) {
        Ok(statement) => match args.format {
            Format::Debug => println!("{statement:#?}"),
            Format::Json => match serde_json_string(&statement) {
                Ok(json) => println!("{json}"),
                Err(err) => {
                    eprintln!("error serializing AST: {err}");
                    std::process::exit(1);
                }
            },
        },
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

fn read_input(args: &Args) -> std::io::Result<String> {
    if let Some(path) = &args.file {
        return std::fs::read_to_string(path);
    }
    if let Some(statement) = &args.statement {
        return Ok(statement.clone());
    }
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(feature = "serde")]
fn serde_json_string(statement: &sql99_parser::ast::Statement) -> Result<String, String> {
    serde_json::to_string_pretty(statement).map_err(|e| e.to_string())
}

#[cfg(not(feature = "serde"))]
fn serde_json_string(_statement: &sql99_parser::ast::Statement) -> Result<String, String> {
    Err("json output requires the `serde` feature".to_string())
}
