use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::cart::errors::CartError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for CartError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name, message) = match &self {
            CartError::InvalidQuantity => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "cart.invalid_quantity",
            ),
            CartError::InvalidPrice => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "cart.invalid_price",
            ),
            CartError::LineItemLimitReached => (
                StatusCode::CONFLICT,
                "Conflict",
                "cart.line_item_limit_reached",
            ),
            CartError::LineItemNotFound => (
                StatusCode::NOT_FOUND,
                "NotFound",
                "cart.line_item_not_found",
            ),
            CartError::ProductNotFound => {
                (StatusCode::NOT_FOUND, "NotFound", "cart.product_not_found")
            }
            CartError::EmptyCart => (StatusCode::CONFLICT, "Conflict", "cart.empty"),
            CartError::OrderNotFound => {
                (StatusCode::NOT_FOUND, "NotFound", "cart.order_not_found")
            }
            CartError::Repository(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalError",
                "repository.persistence",
            ),
        };

        (
            status,
            Json(ErrorResponse {
                name: name.to_string(),
                message: message.to_string(),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::errors::RepositoryError;

    #[test]
    fn should_map_errors_to_status_codes() {
        let cases = [
            (CartError::InvalidQuantity, StatusCode::BAD_REQUEST),
            (CartError::LineItemLimitReached, StatusCode::CONFLICT),
            (CartError::ProductNotFound, StatusCode::NOT_FOUND),
            (CartError::EmptyCart, StatusCode::CONFLICT),
            (CartError::OrderNotFound, StatusCode::NOT_FOUND),
            (
                CartError::Repository(RepositoryError::DatabaseError),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let message = error.to_string();
            let (status, json) = error.into_error_response();
            assert_eq!(status, expected);
            assert_eq!(json.0.message, message);
        }
    }
}
