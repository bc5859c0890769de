use std::sync::Arc;

use poem_openapi::{
    OpenApi,
    param::{Header, Path},
    payload::Json,
};
use uuid::Uuid;

use business::domain::cart::use_cases::checkout::{
    CheckoutParams, CheckoutUseCase, GetOrderParams, GetOrderUseCase,
};

use crate::api::checkout::dto::OrderReceiptResponse;
use crate::api::device::parse_device_id;
use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::tags::ApiTags;

pub struct CheckoutApi {
    checkout_use_case: Arc<dyn CheckoutUseCase>,
    get_order_use_case: Arc<dyn GetOrderUseCase>,
}

impl CheckoutApi {
    pub fn new(
        checkout_use_case: Arc<dyn CheckoutUseCase>,
        get_order_use_case: Arc<dyn GetOrderUseCase>,
    ) -> Self {
        Self {
            checkout_use_case,
            get_order_use_case,
        }
    }
}

#[OpenApi]
impl CheckoutApi {
    /// Check out
    ///
    /// Places an order for the current cart. On success the line items are
    /// cleared and the cart panel closes; the wishlist is kept.
    #[oai(path = "/checkout", method = "post", tag = "ApiTags::Checkout")]
    async fn checkout(
        &self,
        #[oai(name = "X-Device-Id")] device_id: Header<String>,
    ) -> CheckoutResponse {
        let device_id = match parse_device_id(&device_id.0) {
            Ok(id) => id,
            Err(json) => return CheckoutResponse::BadRequest(json),
        };

        match self.checkout_use_case.execute(CheckoutParams { device_id }).await {
            Ok(receipt) => CheckoutResponse::Created(Json(receipt.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    409 => CheckoutResponse::Conflict(json),
                    _ => CheckoutResponse::InternalError(json),
                }
            }
        }
    }

    /// Get an order
    ///
    /// Receipt of an order previously placed from this device.
    #[oai(path = "/orders/:order_id", method = "get", tag = "ApiTags::Checkout")]
    async fn get_order(
        &self,
        #[oai(name = "X-Device-Id")] device_id: Header<String>,
        order_id: Path<Uuid>,
    ) -> GetOrderResponse {
        let device_id = match parse_device_id(&device_id.0) {
            Ok(id) => id,
            Err(json) => return GetOrderResponse::BadRequest(json),
        };
        let params = GetOrderParams {
            device_id,
            order_id: order_id.0,
        };

        match self.get_order_use_case.execute(params).await {
            Ok(receipt) => GetOrderResponse::Ok(Json(receipt.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => GetOrderResponse::NotFound(json),
                    _ => GetOrderResponse::InternalError(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetOrderResponse {
    #[oai(status = 200)]
    Ok(Json<OrderReceiptResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum CheckoutResponse {
    #[oai(status = 201)]
    Created(Json<OrderReceiptResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
