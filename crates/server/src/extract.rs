use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::{header, StatusCode},
    Form,
};
use serde_json::{Map, Value};
use service::cafe_service::AddCafeInput;

use crate::errors::JsonApiError;

/// `/add/` form fields from a query string (GET), an urlencoded body or a
/// `multipart/form-data` body. File parts are skipped; a repeated text field keeps its first value.
#[derive(Debug)]
pub struct AddCafeForm(pub AddCafeInput);

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.trim_start().to_ascii_lowercase().starts_with("multipart/form-data"))
}

#[async_trait]
impl<S> FromRequest<S> for AddCafeForm
where
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_multipart(&req) {
            let Form(input) = Form::<AddCafeInput>::from_request(req, state).await?;
            return Ok(Self(input));
        }

        let mut multipart = Multipart::from_request(req, state).await?;
        let mut fields = Map::new();
        while let Some(field) = multipart.next_field().await? {
            if field.file_name().is_some() {
                continue;
            }
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            let value = field.text().await?;
            fields.entry(name).or_insert(Value::String(value));
        }
        let input = serde_json::from_value(Value::Object(fields))
            .map_err(|e| JsonApiError::new(StatusCode::BAD_REQUEST, "Bad Request", e.to_string()))?;
        Ok(Self(input))
    }
}
