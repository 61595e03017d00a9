pub mod analytics;
pub mod auth;
pub mod burners;
pub mod cleaning;
pub mod dashboard;
mod rate_limit;
pub mod temps;
pub mod tip_damage;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable};

use rate_limit::FallbackIpKeyExtractor;

use crate::common::AppState;
use crate::error::{AppError, AppResult};

/// Liveness probe
///
/// Always 200 while the process is serving. Deliberately free of auth,
/// rate limiting, and store access so orchestration probes stay cheap.
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Service is up"),
    ),
    tag = "health"
)]
pub async fn healthz() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}

/// Pick a response format from the `format` query parameter, falling back
/// to the Accept header. Query parameter wins.
pub fn determine_format(query_format: &str, headers: &axum::http::HeaderMap) -> String {
    if query_format != "json" {
        return query_format.to_lowercase();
    }

    if let Some(accept) = headers.get(axum::http::header::ACCEPT)
        && let Ok(accept_str) = accept.to_str()
        && accept_str.contains("text/csv")
    {
        return "csv".to_string();
    }

    "json".to_string()
}

/// Serve an in-memory CSV document.
pub fn csv_response(data: Vec<u8>) -> AppResult<axum::response::Response> {
    axum::response::Response::builder()
        .header(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("text/csv"),
        )
        .body(axum::body::Body::from(data))
        .map_err(|e| AppError::Internal(e.to_string()))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        healthz,
        auth::login,
        auth::logout,
        burners::list_burners,
        burners::set_burner_state,
        burners::stream_burners,
        analytics::wall_analytics,
        analytics::active_alarms,
        temps::list_temp_readings,
        temps::record_temp_reading,
        cleaning::list_cleaning_history,
        cleaning::record_cleaning_event,
        tip_damage::list_tip_damage,
        tip_damage::upsert_tip_damage,
    ),
    components(
        schemas(
            auth::LoginRequest,
            burners::BurnerResponse,
            burners::SetBurnerStateRequest,
            temps::TempReadingRequest,
            temps::TempReadingResponse,
            cleaning::CleaningEventRequest,
            cleaning::CleaningEventResponse,
            tip_damage::TipDamageRequest,
            tip_damage::TipDamageResponse,
            crate::board::analytics::WallAnalytics,
            crate::board::analytics::StateCounts,
            crate::board::analytics::Severity,
            crate::session::OperatorSession,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Operator login and logout"),
        (name = "burners", description = "Burner grid state and change feed"),
        (name = "analytics", description = "Per-wall imbalance analytics and alarms"),
        (name = "logs", description = "Temperature, cleaning, and tip damage logs"),
    ),
    info(
        title = "Reformer DB API",
        description = "Burner wall monitoring API for reformer SCADA dashboards",
        version = "0.1.0"
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some("Session token issued by /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let config = &state.config;

    if config.disable_rate_limiting {
        tracing::warn!("Rate limiting DISABLED");
    } else {
        tracing::info!(
            login_rate = %format!("{}/s burst {}", config.rate_limit_login_per_second, config.rate_limit_login_burst),
            "Login rate limiting configured"
        );
    }

    // Login is the only brute-forceable surface; everything else sits
    // behind a session token.
    let login_route_base = Router::new().route("/auth/login", post(auth::login));

    let login_route = if config.disable_rate_limiting {
        login_route_base
    } else {
        let login_limiter = GovernorConfigBuilder::default()
            .key_extractor(FallbackIpKeyExtractor)
            .per_second(config.rate_limit_login_per_second)
            .burst_size(config.rate_limit_login_burst)
            .finish()
            .expect("Failed to create login rate limiter");

        login_route_base.layer(GovernorLayer {
            config: Arc::new(login_limiter),
        })
    };

    let api_routes = Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/burners", get(burners::list_burners))
        .route(
            "/burners/{wall}/{row}/{burner_num}",
            put(burners::set_burner_state),
        )
        .route("/analytics/walls", get(analytics::wall_analytics))
        .route("/alarms", get(analytics::active_alarms))
        .route(
            "/temp-readings",
            get(temps::list_temp_readings).post(temps::record_temp_reading),
        )
        .route(
            "/cleaning-history",
            get(cleaning::list_cleaning_history).post(cleaning::record_cleaning_event),
        )
        .route(
            "/tip-damage",
            get(tip_damage::list_tip_damage).put(tip_damage::upsert_tip_damage),
        )
        .merge(login_route)
        .layer(RequestBodyLimitLayer::new(1024 * 1024)); // 1MB body limit

    // Health check routes (NO rate limiting)
    let health_routes = Router::new().route("/healthz", get(healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    // Operator dashboard UI
    let ui_routes = Router::new().route("/", get(dashboard::dashboard));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(docs_routes)
        .merge(ui_routes)
        .layer(CompressionLayer::new())
        // The change feed joins after the compression layer: buffering
        // event-stream bodies would hold updates back from the browser.
        .route("/api/burners/stream", get(burners::stream_burners))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
