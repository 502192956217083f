use crate::utils::error::AppError;
use indexmap::IndexMap;
use okapi::openapi3::SchemaObject;
use rocket_okapi::gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::{MediaType, RefOr, Response, Responses};
use rocket_okapi::response::OpenApiResponderInner;

// One documented example per error status
fn error_examples() -> Vec<AppError> {
    vec![
        AppError::ValidationError("Departure time must be HH:MM".into()),
        AppError::AuthError("Invalid token".into()),
        AppError::Forbidden("SENIOR role required".into()),
        AppError::NotFound("Flight not found".into()),
        AppError::Conflict("Seat is already booked".into()),
        AppError::Unprocessable("Booking failed".into()),
        AppError::DatabaseError(String::new()),
    ]
}

fn json_response(error: &AppError) -> Response {
    let mut content = IndexMap::new();
    content.insert(
        "application/json".to_string(),
        MediaType {
            schema: Some(SchemaObject::default()),
            example: Some(error.body()),
            ..Default::default()
        },
    );

    Response {
        description: error.status().reason_lossy().to_string(),
        content,
        ..Default::default()
    }
}

impl OpenApiResponderInner for AppError {
    fn responses(_gen: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        let mut responses = Responses::default();
        for error in error_examples() {
            responses
                .responses
                .insert(error.status().code.to_string(), RefOr::Object(json_response(&error)));
        }
        Ok(responses)
    }
}
