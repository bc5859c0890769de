use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::events::Panel;
use crate::domain::cart::use_cases::panel::{
    GetPanelsUseCase, PanelAction, PanelState, UpdatePanelParams, UpdatePanelUseCase,
};
use crate::domain::logger::Logger;
use crate::domain::shared::value_objects::DeviceId;

use super::panel::PanelChannel;
use super::session::CartSessions;

fn state_of(panels: &PanelChannel) -> PanelState {
    PanelState {
        cart_open: panels.is_open(Panel::Cart),
        wishlist_open: panels.is_open(Panel::Wishlist),
    }
}

pub struct UpdatePanelUseCaseImpl {
    pub sessions: Arc<CartSessions>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdatePanelUseCase for UpdatePanelUseCaseImpl {
    async fn execute(&self, params: UpdatePanelParams) -> PanelState {
        self.logger.debug(&format!(
            "Panel {} {:?} for device {}",
            params.panel, params.action, params.device_id
        ));

        let session = self.sessions.session(&params.device_id).await;
        let mut session = session.lock().await;
        match params.action {
            PanelAction::Open => session.panels.open(params.panel),
            PanelAction::Close => session.panels.close(params.panel),
            PanelAction::Toggle => {
                session.panels.toggle(params.panel);
            }
        }

        state_of(&session.panels)
    }
}

pub struct GetPanelsUseCaseImpl {
    pub sessions: Arc<CartSessions>,
}

#[async_trait]
impl GetPanelsUseCase for GetPanelsUseCaseImpl {
    async fn execute(&self, device_id: DeviceId) -> PanelState {
        let session = self.sessions.session(&device_id).await;
        let session = session.lock().await;
        state_of(&session.panels)
    }
}
