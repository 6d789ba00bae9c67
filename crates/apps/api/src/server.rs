use crate::api_state::ApiContext;
use crate::create_router;
use app_state::AppSettings;
use axum::routing::get_service;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use http::{header, HeaderValue};
use sqlx::PgPool;
use std::iter::once;
use std::net::SocketAddr;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub async fn serve(pool: PgPool, settings: AppSettings) -> Result<()> {
    info!("Initializing server...");
    let api_state = ApiContext {
        pool,
        settings: settings.clone(),
    };

    let allowed_origins: Vec<HeaderValue> = settings
        .api
        .allowed_origins
        .iter()
        .filter_map(|s| match s.parse() {
            Ok(hv) => Some(hv),
            Err(e) => {
                error!("Invalid CORS origin configured: {} - Error: {}", s, e);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_methods(cors::Any)
        .allow_origin(allowed_origins)
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            header::USER_AGENT,
        ]);

    // Stored files never change once written; let clients cache forever.
    let cache_layer = SetResponseHeaderLayer::if_not_present(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=31536000, immutable"),
    );

    let uploads_dir = ServeDir::new(&settings.uploads.upload_folder);
    let avatars_dir = ServeDir::new(&settings.uploads.avatar_folder);

    let app = create_router(api_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(SetSensitiveRequestHeadersLayer::new(once(
            header::AUTHORIZATION,
        )))
        .nest_service(
            "/uploads",
            get_service(uploads_dir).layer(cache_layer.clone()),
        )
        .nest_service("/avatars", get_service(avatars_dir).layer(cache_layer));

    let addr: SocketAddr = format!("{}:{}", settings.api.host, settings.api.port)
        .parse()
        .map_err(|e| eyre!("Invalid address: {}", e))?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
