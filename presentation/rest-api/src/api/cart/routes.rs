use std::sync::Arc;

use poem_openapi::{OpenApi, param::Header, payload::Json};

use business::domain::cart::use_cases::add_item::{AddCartItemParams, AddCartItemUseCase};
use business::domain::cart::use_cases::clear::{ClearCartParams, ClearCartUseCase};
use business::domain::cart::use_cases::get_cart::{GetCartParams, GetCartUseCase};
use business::domain::cart::use_cases::remove_item::{
    RemoveCartItemParams, RemoveCartItemUseCase,
};
use business::domain::cart::use_cases::set_quantity::{
    SetCartItemQuantityParams, SetCartItemQuantityUseCase,
};
use business::domain::shared::value_objects::ProductId;

use crate::api::cart::dto::{
    AddCartItemRequest, CartResponse, RemoveCartItemRequest, SetCartItemQuantityRequest,
    to_quantity,
};
use crate::api::device::parse_device_id;
use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::tags::ApiTags;

pub struct CartApi {
    get_cart_use_case: Arc<dyn GetCartUseCase>,
    add_item_use_case: Arc<dyn AddCartItemUseCase>,
    set_quantity_use_case: Arc<dyn SetCartItemQuantityUseCase>,
    remove_item_use_case: Arc<dyn RemoveCartItemUseCase>,
    clear_use_case: Arc<dyn ClearCartUseCase>,
}

impl CartApi {
    pub fn new(
        get_cart_use_case: Arc<dyn GetCartUseCase>,
        add_item_use_case: Arc<dyn AddCartItemUseCase>,
        set_quantity_use_case: Arc<dyn SetCartItemQuantityUseCase>,
        remove_item_use_case: Arc<dyn RemoveCartItemUseCase>,
        clear_use_case: Arc<dyn ClearCartUseCase>,
    ) -> Self {
        Self {
            get_cart_use_case,
            add_item_use_case,
            set_quantity_use_case,
            remove_item_use_case,
            clear_use_case,
        }
    }
}

/// Cart API
///
/// Every route works on the cart of the device named by the `X-Device-Id`
/// header. Line items are keyed by product id plus attributes.
#[OpenApi]
impl CartApi {
    /// Get the cart
    ///
    /// Returns line items, wishlist and derived totals.
    #[oai(path = "/cart", method = "get", tag = "ApiTags::Cart")]
    async fn get_cart(
        &self,
        #[oai(name = "X-Device-Id")] device_id: Header<String>,
    ) -> CartQueryResponse {
        let device_id = match parse_device_id(&device_id.0) {
            Ok(id) => id,
            Err(json) => return CartQueryResponse::BadRequest(json),
        };

        match self.get_cart_use_case.execute(GetCartParams { device_id }).await {
            Ok(summary) => CartQueryResponse::Ok(Json(summary.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => CartQueryResponse::BadRequest(json),
                    _ => CartQueryResponse::InternalError(json),
                }
            }
        }
    }

    /// Add an item
    ///
    /// Adds units of a catalog product. Adding a product/attributes pair that
    /// is already in the cart increases its quantity. Opens the cart panel
    /// unless disabled by configuration.
    #[oai(path = "/cart/items", method = "post", tag = "ApiTags::Cart")]
    async fn add_item(
        &self,
        #[oai(name = "X-Device-Id")] device_id: Header<String>,
        body: Json<AddCartItemRequest>,
    ) -> AddCartItemResponse {
        let device_id = match parse_device_id(&device_id.0) {
            Ok(id) => id,
            Err(json) => return AddCartItemResponse::BadRequest(json),
        };

        let result = match to_quantity(body.0.quantity) {
            Ok(quantity) => {
                let params = AddCartItemParams {
                    device_id,
                    product_id: ProductId::from(body.0.product_id),
                    attributes: body.0.attributes,
                    quantity,
                };
                self.add_item_use_case.execute(params).await
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(summary) => AddCartItemResponse::Ok(Json(summary.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => AddCartItemResponse::BadRequest(json),
                    404 => AddCartItemResponse::NotFound(json),
                    409 => AddCartItemResponse::Conflict(json),
                    _ => AddCartItemResponse::InternalError(json),
                }
            }
        }
    }

    /// Set an item quantity
    ///
    /// Replaces the quantity of an existing line. Zero is rejected; use the
    /// remove route instead.
    #[oai(path = "/cart/items", method = "put", tag = "ApiTags::Cart")]
    async fn set_quantity(
        &self,
        #[oai(name = "X-Device-Id")] device_id: Header<String>,
        body: Json<SetCartItemQuantityRequest>,
    ) -> SetCartItemQuantityResponse {
        let device_id = match parse_device_id(&device_id.0) {
            Ok(id) => id,
            Err(json) => return SetCartItemQuantityResponse::BadRequest(json),
        };

        let result = match to_quantity(body.0.quantity) {
            Ok(quantity) => {
                let params = SetCartItemQuantityParams {
                    device_id,
                    product_id: ProductId::from(body.0.product_id),
                    attributes: body.0.attributes,
                    quantity,
                };
                self.set_quantity_use_case.execute(params).await
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(summary) => SetCartItemQuantityResponse::Ok(Json(summary.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => SetCartItemQuantityResponse::BadRequest(json),
                    404 => SetCartItemQuantityResponse::NotFound(json),
                    _ => SetCartItemQuantityResponse::InternalError(json),
                }
            }
        }
    }

    /// Remove an item
    ///
    /// Removes a line. Removing a line that is not in the cart is a no-op.
    #[oai(path = "/cart/items/remove", method = "post", tag = "ApiTags::Cart")]
    async fn remove_item(
        &self,
        #[oai(name = "X-Device-Id")] device_id: Header<String>,
        body: Json<RemoveCartItemRequest>,
    ) -> CartQueryResponse {
        let device_id = match parse_device_id(&device_id.0) {
            Ok(id) => id,
            Err(json) => return CartQueryResponse::BadRequest(json),
        };

        let params = RemoveCartItemParams {
            device_id,
            product_id: ProductId::from(body.0.product_id),
            attributes: body.0.attributes,
        };

        match self.remove_item_use_case.execute(params).await {
            Ok(summary) => CartQueryResponse::Ok(Json(summary.into())),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                CartQueryResponse::InternalError(json)
            }
        }
    }

    /// Clear the cart
    ///
    /// Removes every line item. The wishlist is kept.
    #[oai(path = "/cart", method = "delete", tag = "ApiTags::Cart")]
    async fn clear(
        &self,
        #[oai(name = "X-Device-Id")] device_id: Header<String>,
    ) -> CartQueryResponse {
        let device_id = match parse_device_id(&device_id.0) {
            Ok(id) => id,
            Err(json) => return CartQueryResponse::BadRequest(json),
        };

        match self.clear_use_case.execute(ClearCartParams { device_id }).await {
            Ok(summary) => CartQueryResponse::Ok(Json(summary.into())),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                CartQueryResponse::InternalError(json)
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum CartQueryResponse {
    #[oai(status = 200)]
    Ok(Json<CartResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum AddCartItemResponse {
    #[oai(status = 200)]
    Ok(Json<CartResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum SetCartItemQuantityResponse {
    #[oai(status = 200)]
    Ok(Json<CartResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
