use serde::Serialize;

use soql_core::DataType;

use crate::errors::CliError;
use crate::ui::{self, OutputFormat};

#[derive(Debug, Serialize)]
struct OperatorListing {
    data_type: DataType,
    input: String,
    quoted: bool,
    operators: Vec<OperatorInfo>,
}

#[derive(Debug, Serialize)]
struct OperatorInfo {
    token: &'static str,
    label: &'static str,
}

/// Lists the operators a data type offers.
pub fn list_operators(data_type_name: &str, output_format: OutputFormat) -> Result<(), CliError> {
    ui::header(&format!("Listing operators for {}", data_type_name));

    let data_type: DataType = data_type_name.parse().map_err(|e: soql_core::CatalogError| {
        ui::error(&e.to_string());
        ui::info(&format!(
            "Known data types: {}",
            DataType::ALL
                .iter()
                .map(|data_type| data_type.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));
        CliError::InputError
    })?;

    let policy = data_type.policy();
    let operators: Vec<OperatorInfo> = data_type
        .operators()
        .into_iter()
        .map(|operator| OperatorInfo {
            token: operator.token(),
            label: operator.label(),
        })
        .collect();

    ui::success(&format!(
        "{} offers {} operators ({} input)",
        data_type,
        operators.len(),
        policy.input_kind
    ));

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_table(
            &operators
                .iter()
                .map(|info| (info.token.to_string(), info.label.to_string()))
                .collect::<Vec<_>>(),
        ),
        OutputFormat::Json => ui::json_output(&OperatorListing {
            data_type,
            input: policy.input_kind.to_string(),
            quoted: policy.requires_quoting,
            operators,
        }),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_type() {
        assert_eq!(list_operators("picklist", OutputFormat::Json), Ok(()));
        assert_eq!(list_operators("INTEGER", OutputFormat::Pretty), Ok(()));
    }

    #[test]
    fn test_unknown_type() {
        assert_eq!(
            list_operators("geolocation", OutputFormat::Pretty),
            Err(CliError::InputError)
        );
    }
}
