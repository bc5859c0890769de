use std::sync::Arc;

use poem_openapi::{
    OpenApi,
    param::{Header, Path},
    payload::Json,
};

use business::domain::cart::use_cases::get_cart::{GetCartParams, GetCartUseCase};
use business::domain::cart::use_cases::toggle_wishlist::{
    ToggleWishlistParams, ToggleWishlistUseCase,
};
use business::domain::shared::value_objects::ProductId;

use crate::api::device::parse_device_id;
use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::tags::ApiTags;
use crate::api::wishlist::dto::{
    ToggleWishlistResponse, WishlistMembershipResponse, WishlistResponse,
};

pub struct WishlistApi {
    get_cart_use_case: Arc<dyn GetCartUseCase>,
    toggle_use_case: Arc<dyn ToggleWishlistUseCase>,
}

impl WishlistApi {
    pub fn new(
        get_cart_use_case: Arc<dyn GetCartUseCase>,
        toggle_use_case: Arc<dyn ToggleWishlistUseCase>,
    ) -> Self {
        Self {
            get_cart_use_case,
            toggle_use_case,
        }
    }
}

/// Wishlist API
///
/// The wishlist lives in the same snapshot as the cart and is persisted with it.
#[OpenApi]
impl WishlistApi {
    /// Get the wishlist
    #[oai(path = "/wishlist", method = "get", tag = "ApiTags::Wishlist")]
    async fn get_wishlist(
        &self,
        #[oai(name = "X-Device-Id")] device_id: Header<String>,
    ) -> GetWishlistResponse {
        let device_id = match parse_device_id(&device_id.0) {
            Ok(id) => id,
            Err(json) => return GetWishlistResponse::BadRequest(json),
        };

        match self.get_cart_use_case.execute(GetCartParams { device_id }).await {
            Ok(summary) => GetWishlistResponse::Ok(Json(summary.into())),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                GetWishlistResponse::InternalError(json)
            }
        }
    }

    /// Check a product
    ///
    /// Tells whether a product is in the wishlist.
    #[oai(
        path = "/wishlist/:product_id",
        method = "get",
        tag = "ApiTags::Wishlist"
    )]
    async fn is_in_wishlist(
        &self,
        #[oai(name = "X-Device-Id")] device_id: Header<String>,
        product_id: Path<String>,
    ) -> WishlistMembership {
        let device_id = match parse_device_id(&device_id.0) {
            Ok(id) => id,
            Err(json) => return WishlistMembership::BadRequest(json),
        };

        let product_id = ProductId::from(product_id.0);
        match self.get_cart_use_case.execute(GetCartParams { device_id }).await {
            Ok(summary) => WishlistMembership::Ok(Json(WishlistMembershipResponse {
                in_wishlist: summary.snapshot.is_in_wishlist(&product_id),
                product_id: product_id.to_string(),
            })),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                WishlistMembership::InternalError(json)
            }
        }
    }

    /// Toggle a product
    ///
    /// Adds the product when absent, removes it when present.
    #[oai(
        path = "/wishlist/:product_id/toggle",
        method = "post",
        tag = "ApiTags::Wishlist"
    )]
    async fn toggle(
        &self,
        #[oai(name = "X-Device-Id")] device_id: Header<String>,
        product_id: Path<String>,
    ) -> ToggleWishlist {
        let device_id = match parse_device_id(&device_id.0) {
            Ok(id) => id,
            Err(json) => return ToggleWishlist::BadRequest(json),
        };

        let params = ToggleWishlistParams {
            device_id,
            product_id: ProductId::from(product_id.0),
        };
        match self.toggle_use_case.execute(params).await {
            Ok(state) => ToggleWishlist::Ok(Json(state.into())),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                ToggleWishlist::InternalError(json)
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetWishlistResponse {
    #[oai(status = 200)]
    Ok(Json<WishlistResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum WishlistMembership {
    #[oai(status = 200)]
    Ok(Json<WishlistMembershipResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum ToggleWishlist {
    #[oai(status = 200)]
    Ok(Json<ToggleWishlistResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
