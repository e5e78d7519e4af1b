//! Schema contract checks.

use apiprobe_application::ReportSink;
use apiprobe_domain::AssertionFailure;
use apiprobe_domain::report::Attachment;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::HarnessResult;
use crate::schema::SchemaRegistry;
use crate::serialization::to_attachment_json;

/// Attachment recorded when the data conforms.
pub const SCHEMA_VALIDATION: &str = "Schema Validation";
/// Attachment recorded when the data does not conform.
pub const SCHEMA_VALIDATION_FAILURE: &str = "Schema Validation Failure";

/// Validates `data` against the schema named `schema_name`.
///
/// The schema is read from the registry on every call and compiled with
/// format checking on, so `"format": "email"` is enforced. On success a
/// text attachment confirms the match. On mismatch a JSON attachment records
/// the schema name, the validator's messages and the offending data.
///
/// # Errors
///
/// Returns [`HarnessError::Assertion`](crate::HarnessError::Assertion) when
/// the data does not conform, with the message
/// `Data does not match <name> schema: <reason>`. A missing, unreadable or
/// invalid schema file yields the corresponding harness error instead.
pub fn assert_json_schema(
    data: &Value,
    schema_name: &str,
    schemas: &SchemaRegistry,
    report: &dyn ReportSink,
) -> HarnessResult<()> {
    let validator = schemas.compile(schema_name)?;

    let reason = match validator.validate(data) {
        Ok(()) => {
            debug!(schema = schema_name, "data matches schema");
            report.attach(Attachment::text(
                SCHEMA_VALIDATION,
                format!("✓ Data matches {schema_name} schema"),
            ));
            return Ok(());
        }
        Err(error) => error.to_string(),
    };

    let errors: Vec<String> = validator.iter_errors(data).map(|e| e.to_string()).collect();
    let diagnostics = json!({
        "schema": schema_name,
        "error": reason,
        "errors": errors,
        "failed_data": data,
    });
    report.attach(Attachment::json(
        SCHEMA_VALIDATION_FAILURE,
        to_attachment_json(&diagnostics),
    ));

    Err(AssertionFailure::new(format!(
        "Data does not match {schema_name} schema: {reason}"
    ))
    .into())
}
