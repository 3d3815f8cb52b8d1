use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;

use crate::error::AttritionError;

/// JSON body extractor whose rejections use the v1 error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AttritionError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AttritionError {
    fn from(rejection: JsonRejection) -> Self {
        map_json_rejection(rejection)
    }
}

fn map_json_rejection(rejection: JsonRejection) -> AttritionError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let message = err.body_text();
            match extract_missing_field(&message) {
                Some(field) => AttritionError::Validation(format!("Missing required field: {field}")),
                None => AttritionError::Validation(format!("Invalid JSON: {message}")),
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            AttritionError::Validation(format!("JSON syntax error: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => AttritionError::Validation(
            "Missing `Content-Type: application/json` header".to_string(),
        ),
        JsonRejection::BytesRejection(_) => {
            AttritionError::Internal("Failed to read request body".to_string())
        }
        _ => AttritionError::Validation(rejection.body_text()),
    }
}

fn extract_missing_field(message: &str) -> Option<&str> {
    let prefix = "missing field `";
    let start = message.find(prefix)? + prefix.len();
    let remaining = message.get(start..)?;
    let end = remaining.find('`')?;
    remaining.get(..end)
}
