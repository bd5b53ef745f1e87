use std::path::Path;

use crate::errors::CliError;
use crate::session::load_session;
use crate::ui::{self, OutputFormat};

/// Lists the fields of a session's object type that can be filtered on.
pub fn list_fields(session_path: &Path, output_format: OutputFormat) -> Result<(), CliError> {
    ui::header("Listing filterable fields");
    let session = load_session(session_path)?;
    let metadata = session.metadata();
    let fields = metadata.filterable();

    let skipped = metadata.fields.len() - fields.len();
    ui::success(&format!(
        "Found {} filterable fields on {}",
        fields.len(),
        metadata.object_type
    ));
    if skipped > 0 {
        ui::info(&format!("{} fields have unsupported data types", skipped));
    }

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_table(
            &fields
                .iter()
                .map(|field| {
                    (
                        field.label.clone(),
                        format!("{} ({})", field.api_name, field.data_type),
                    )
                })
                .collect::<Vec<_>>(),
        ),
        OutputFormat::Json => ui::json_output(&fields),
    }

    Ok(())
}
