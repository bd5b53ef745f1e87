use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::ui::OutputFormat;

/// Defines the top-level interface for the SOQL filter CLI with clap.
#[derive(Parser, Debug)]
#[command(name = "soql-filter")]
#[command(version, about = "Build SOQL WHERE clauses from filter rows.")]
pub struct SoqlCli {
    /// Enable verbose output?
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value_t = OutputFormat::default())]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: SoqlCliCommand,
}

/// Defines the available subcommands of the SOQL filter CLI.
#[derive(Subcommand, Debug, PartialEq)]
pub enum SoqlCliCommand {
    /// Compile the filters in a session file into a query.
    Build {
        /// Session file (JSON) with object type, fields and filter rows
        session: PathBuf,
    },
    /// Check custom filter logic against a number of rows.
    Validate {
        /// Custom logic, e.g. "1 AND (2 OR 3)"
        expression: String,
        /// Number of filter rows the logic must cover
        #[arg(short, long)]
        rows: usize,
    },
    /// List the operators offered for a data type.
    Operators {
        /// Data type name (e.g. STRING, picklist, DateTime)
        data_type: String,
    },
    /// List the filterable fields in a session file.
    Fields {
        /// Session file (JSON)
        session: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validate() {
        let cli = SoqlCli::parse_from(["soql-filter", "validate", "1 AND 2", "--rows", "2"]);
        assert_eq!(
            cli.command,
            SoqlCliCommand::Validate {
                expression: "1 AND 2".to_string(),
                rows: 2
            }
        );
        assert_eq!(cli.format, OutputFormat::Pretty);
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = SoqlCli::parse_from(["soql-filter", "operators", "picklist", "-v", "--format", "json"]);
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
