use async_trait::async_trait;

use crate::domain::cart::events::Panel;
use crate::domain::shared::value_objects::DeviceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Open,
    Close,
    Toggle,
}

pub struct UpdatePanelParams {
    pub device_id: DeviceId,
    pub panel: Panel,
    pub action: PanelAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelState {
    pub cart_open: bool,
    pub wishlist_open: bool,
}

#[async_trait]
pub trait UpdatePanelUseCase: Send + Sync {
    async fn execute(&self, params: UpdatePanelParams) -> PanelState;
}

#[async_trait]
pub trait GetPanelsUseCase: Send + Sync {
    async fn execute(&self, device_id: DeviceId) -> PanelState;
}
