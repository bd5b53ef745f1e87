//! Terminal output helpers

use clap::ValueEnum;
use console::style;
use serde::Serialize;
use std::fmt;

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Pretty => write!(f, "pretty"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

pub fn header(msg: &str) {
    eprintln!("{}", style(msg).bold());
}

pub fn success(msg: &str) {
    eprintln!("{} {}", style("✓").green(), msg);
}

pub fn info(msg: &str) {
    eprintln!("{}", style(msg).dim());
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", style("!").yellow(), style(msg).yellow());
}

pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red(), style(msg).red());
}

pub fn error_with_details(msg: &str, details: &str) {
    error(msg);
    eprintln!("  {}", style(details).dim());
}

pub fn debug(msg: &str) {
    log::debug!("{}", msg);
}

/// Writes results to stdout as pretty-printed JSON
pub fn json_output<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => error_with_details("Failed to serialize output", &e.to_string()),
    }
}

/// Writes a single line of result text to stdout
pub fn raw_output(text: &str) {
    println!("{}", text);
}

/// Writes an aligned two-column table to stdout
pub fn pretty_output_table(rows: &[(String, String)]) {
    let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);
    for (left, right) in rows {
        println!("{}  {}", style(format!("{:width$}", left)).cyan(), right);
    }
}
