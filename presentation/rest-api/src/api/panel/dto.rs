use poem_openapi::{Enum, Object};

use business::domain::cart::use_cases::panel::{PanelAction, PanelState};

#[derive(Debug, Clone, Copy, Enum)]
#[oai(rename_all = "lowercase")]
pub enum PanelActionDto {
    Open,
    Close,
    Toggle,
}

impl From<PanelActionDto> for PanelAction {
    fn from(action: PanelActionDto) -> Self {
        match action {
            PanelActionDto::Open => PanelAction::Open,
            PanelActionDto::Close => PanelAction::Close,
            PanelActionDto::Toggle => PanelAction::Toggle,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct UpdatePanelRequest {
    pub action: PanelActionDto,
}

#[derive(Debug, Clone, Object)]
pub struct PanelStateResponse {
    pub cart_open: bool,
    pub wishlist_open: bool,
}

impl From<PanelState> for PanelStateResponse {
    fn from(state: PanelState) -> Self {
        Self {
            cart_open: state.cart_open,
            wishlist_open: state.wishlist_open,
        }
    }
}
