//! JSON body extraction with validation.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use backoffice_core::AppError;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// Text in `text` after `start`, up to `end` or the end of the text.
fn between<'a>(text: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let rest = &text[text.find(start)? + start.len()..];
    rest.split(end).next()
}

/// Maps a body rejection onto the API's error messages. Unknown module
/// names are a rule violation; every other decoding failure is a bad
/// request.
fn rejection_error(rejection: JsonRejection) -> AppError {
    if let JsonRejection::MissingJsonContentType(_) = rejection {
        return AppError::bad_request(anyhow!("Missing 'Content-Type: application/json' header"));
    }

    let text = rejection.body_text();
    if let Some(field) = between(&text, "missing field `", "`") {
        return AppError::bad_request(anyhow!("{} is required", field));
    }
    if let Some(module) = between(&text, "Unknown module: ", " at line") {
        return AppError::unprocessable(anyhow!("Unknown module: {}", module));
    }
    if text.contains("invalid type") || text.contains("unknown variant") {
        return AppError::bad_request(anyhow!("Invalid field type in request"));
    }
    AppError::bad_request(anyhow!("Invalid request body"))
}

/// Joins rule messages, ordered by field name.
fn format_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// `Json<T>` that also runs `T`'s `validator` rules.
///
/// Malformed bodies and missing fields are rejected with 400; rule
/// violations, including unknown module names, with 422.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_error)?;

        value
            .validate()
            .map_err(|errors| AppError::unprocessable(anyhow!("{}", format_errors(&errors))))?;

        Ok(ValidatedJson(value))
    }
}
