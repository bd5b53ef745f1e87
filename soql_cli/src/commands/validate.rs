use serde::Serialize;

use soql_lang::custom_logic::check_custom_logic;

use crate::errors::CliError;
use crate::ui::{self, OutputFormat};

#[derive(Debug, Serialize)]
struct ValidationReport {
    valid: bool,
    expression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Checks custom logic against a row count.
pub fn validate_logic(
    expression: &str,
    row_count: usize,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header(&format!("Validating custom logic for {} rows", row_count));

    match check_custom_logic(expression, row_count) {
        Ok(expr) => {
            ui::success("Custom logic is valid");
            match output_format {
                OutputFormat::Pretty => ui::raw_output(&expr.to_string()),
                OutputFormat::Json => ui::json_output(&ValidationReport {
                    valid: true,
                    expression: expr.to_string(),
                    message: None,
                }),
            }
            Ok(())
        }
        Err(e) => {
            ui::error_with_details(e.user_message(), &e.to_string());
            if output_format == OutputFormat::Json {
                ui::json_output(&ValidationReport {
                    valid: false,
                    expression: expression.to_string(),
                    message: Some(e.user_message().to_string()),
                });
            }
            Err(CliError::ValidationError)
        }
    }
}
