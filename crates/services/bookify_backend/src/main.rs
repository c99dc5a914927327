// File: crates/services/bookify_backend/src/main.rs
use axum::{routing::get, Router};
use bookify_calcom::routes as calcom_routes;
use bookify_common::logging;
use bookify_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::info;

#[tokio::main]
async fn main() {
    logging::init();

    let config = Arc::new(load_config().expect("Failed to load config"));

    let mut api_router =
        Router::new().route("/", get(|| async { "Welcome to the Bookify API!" }));
    if config.use_calcom {
        api_router = api_router.merge(calcom_routes(config.clone()));
    } else {
        info!("Cal.com proxy disabled (use_calcom = false)");
    }

    #[allow(unused_mut)] // mutable only when features add routes below
    let mut app = Router::new().nest("/api", api_router);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use bookify_calcom::doc::CalcomApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Bookify API",
                version = "0.1.0",
                description = "Booking widget service API docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(CalcomApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        app = app.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc));
    }

    // Serve the built widget bundle in dev mode
    if cfg!(debug_assertions) {
        info!("Running in development mode, serving static files from ./dist");
        app = app.fallback_service(ServeDir::new("dist"));
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!("Starting server at http://{addr}");
    info!("API endpoints available at http://{addr}/api");

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
