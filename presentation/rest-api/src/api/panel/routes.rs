use std::sync::Arc;

use poem_openapi::{
    OpenApi,
    param::{Header, Path},
    payload::Json,
};

use business::domain::cart::events::Panel;
use business::domain::cart::use_cases::panel::{
    GetPanelsUseCase, UpdatePanelParams, UpdatePanelUseCase,
};

use crate::api::device::parse_device_id;
use crate::api::error::ErrorResponse;
use crate::api::panel::dto::{PanelStateResponse, UpdatePanelRequest};
use crate::api::tags::ApiTags;

pub struct PanelApi {
    get_panels_use_case: Arc<dyn GetPanelsUseCase>,
    update_panel_use_case: Arc<dyn UpdatePanelUseCase>,
}

impl PanelApi {
    pub fn new(
        get_panels_use_case: Arc<dyn GetPanelsUseCase>,
        update_panel_use_case: Arc<dyn UpdatePanelUseCase>,
    ) -> Self {
        Self {
            get_panels_use_case,
            update_panel_use_case,
        }
    }
}

/// Cart and wishlist overlay state
#[OpenApi]
impl PanelApi {
    /// Get panel state
    #[oai(path = "/panels", method = "get", tag = "ApiTags::Panels")]
    async fn get_panels(
        &self,
        #[oai(name = "X-Device-Id")] device_id: Header<String>,
    ) -> PanelResponse {
        let device_id = match parse_device_id(&device_id.0) {
            Ok(id) => id,
            Err(json) => return PanelResponse::BadRequest(json),
        };

        let state = self.get_panels_use_case.execute(device_id).await;
        PanelResponse::Ok(Json(state.into()))
    }

    /// Open, close or toggle a panel
    ///
    /// `panel` is `cart` or `wishlist`. Opening an open panel changes nothing.
    #[oai(path = "/panels/:panel", method = "put", tag = "ApiTags::Panels")]
    async fn update_panel(
        &self,
        #[oai(name = "X-Device-Id")] device_id: Header<String>,
        panel: Path<String>,
        body: Json<UpdatePanelRequest>,
    ) -> PanelResponse {
        let device_id = match parse_device_id(&device_id.0) {
            Ok(id) => id,
            Err(json) => return PanelResponse::BadRequest(json),
        };
        let panel = match panel.0.parse::<Panel>() {
            Ok(panel) => panel,
            Err(_) => {
                return PanelResponse::BadRequest(ErrorResponse::validation("panel.invalid"));
            }
        };

        let params = UpdatePanelParams {
            device_id,
            panel,
            action: body.0.action.into(),
        };
        let state = self.update_panel_use_case.execute(params).await;
        PanelResponse::Ok(Json(state.into()))
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum PanelResponse {
    #[oai(status = 200)]
    Ok(Json<PanelStateResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
}
