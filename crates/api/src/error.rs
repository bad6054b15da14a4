//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use checkout::CheckoutError;
use domain::{AddressError, CartError};
use store::StoreError;

/// API-level error type that maps to HTTP responses.
///
/// Expected validation/ownership failures are explicit variants returned to
/// the caller; downstream persistence or service failures land in the
/// internal category.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// No authenticated customer.
    Unauthorized(String),
    /// Resource exists but is not owned by the caller.
    Forbidden(String),
    /// Address normalization/validation error.
    Address(AddressError),
    /// Order creation error.
    Checkout(CheckoutError),
    /// Storage backend error.
    Store(StoreError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::Address(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::Checkout(err) => checkout_error_to_response(err),
            ApiError::Store(err) => {
                tracing::error!(error = %err, "storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn checkout_error_to_response(err: CheckoutError) -> (StatusCode, String) {
    match &err {
        CheckoutError::CartNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        CheckoutError::Cart(cart_err) => match cart_err {
            CartError::ItemNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
            CartError::AlreadySubmitted => (StatusCode::CONFLICT, err.to_string()),
            CartError::NoItems => (StatusCode::BAD_REQUEST, err.to_string()),
        },
        CheckoutError::NoShippingRate { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
        _ => {
            tracing::error!(error = %err, "checkout failure");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

impl From<AddressError> for ApiError {
    fn from(err: AddressError) -> Self {
        ApiError::Address(err)
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        ApiError::Checkout(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::CartId;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn taxonomy_maps_to_expected_status_codes() {
        assert_eq!(
            status_of(ApiError::NotFound("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ApiError::BadRequest("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ApiError::Unauthorized("x".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(ApiError::Forbidden("x".into())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(ApiError::Internal("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn address_errors_are_client_errors() {
        let err = ApiError::Address(AddressError::Invalid {
            rules: "Please enter the city".to_string(),
        });
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn checkout_errors_map_by_kind() {
        assert_eq!(
            status_of(ApiError::Checkout(CheckoutError::CartNotFound(
                CartId::new()
            ))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ApiError::Checkout(CheckoutError::Cart(
                CartError::AlreadySubmitted
            ))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(ApiError::Checkout(CheckoutError::NoShippingRate {
                method: "ups_ground".to_string()
            })),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ApiError::Checkout(CheckoutError::Submission(
                "down".to_string()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
