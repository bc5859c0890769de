use std::time::Duration;

use poem::{EndpointExt, Route, Server as PoemServer, listener::TcpListener, middleware::Tracing};
use poem_openapi::OpenApiService;

use crate::api::cart::routes::CartApi;
use crate::api::checkout::routes::CheckoutApi;
use crate::api::health::routes::Api as HealthApi;
use crate::api::panel::routes::PanelApi;
use crate::api::wishlist::routes::WishlistApi;
use crate::setup::shutdown::wait_for_signal;
use crate::{config::app_config::AppConfig, setup::dependency_injection::DependencyContainer};

pub type ApiService = OpenApiService<(HealthApi, CartApi, WishlistApi, PanelApi, CheckoutApi), ()>;

/// In-flight requests get this long to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

pub struct Server;

impl Server {
    pub fn api_service(container: DependencyContainer) -> ApiService {
        OpenApiService::new(
            (
                container.health_api,
                container.cart_api,
                container.wishlist_api,
                container.panel_api,
                container.checkout_api,
            ),
            "Storefront Cart API",
            env!("CARGO_PKG_VERSION"),
        )
    }

    pub async fn run(config: AppConfig, container: DependencyContainer) -> anyhow::Result<()> {
        let addr = config.server.bind_address();
        let sessions = container.sessions.clone();
        let api_service = Self::api_service(container).server(format!("http://{}", addr));
        let ui = api_service.swagger_ui();
        let spec = api_service.spec_endpoint();
        let app = Route::new()
            .nest("/", api_service)
            .nest("/docs", ui)
            .nest("/openapi.json", spec)
            .with(config.cors)
            .with(Tracing);
        tracing::info!("Server running at http://{}", addr);
        tracing::info!("Swagger UI at http://{}/docs", addr);
        tracing::info!("OpenAPI JSON at http://{}/openapi.json", addr);

        let served = PoemServer::new(TcpListener::bind(&addr))
            .run_with_graceful_shutdown(app, wait_for_signal(), Some(SHUTDOWN_GRACE))
            .await;

        // Pending snapshot writes are drained even when the listener failed.
        sessions.shutdown().await;
        served?;
        Ok(())
    }
}
