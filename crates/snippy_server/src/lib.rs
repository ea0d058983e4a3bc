//! HTTP server wiring for Snippy (API, handlers, and shared state).

/// HTTP error mapping for API handlers.
pub mod error;
/// HTTP handlers for paste endpoints.
pub mod handlers;

pub use snippy_core::{
    config, db, models, AppError, Config, Database, PasteStore, DEFAULT_PORT,
};

use axum::{
    extract::DefaultBodyLimit,
    http::{header, request::Parts, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

/// Shared state passed to HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PasteStore>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Construct shared state over an open database, applying the
    /// configured expiry policy and allocation cap.
    pub fn new(config: Config, db: Database) -> Self {
        let store = PasteStore::from_config(Arc::new(db.pastes), &config);
        Self::with_store(config, store)
    }

    /// Construct shared state around a pre-built store.
    pub fn with_store(config: Config, store: PasteStore) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}

/// Resolve the listener address from env var overrides and security policy.
///
/// # Returns
/// A socket address that stays on loopback unless public access is enabled.
pub fn resolve_bind_address(config: &Config, allow_public_access: bool) -> SocketAddr {
    resolve_bind_address_from(std::env::var("BIND").ok(), config, allow_public_access)
}

fn resolve_bind_address_from(
    bind: Option<String>,
    config: &Config,
    allow_public_access: bool,
) -> SocketAddr {
    let default_bind = SocketAddr::from(([127, 0, 0, 1], config.port));
    let requested = match bind {
        Some(value) => match value.trim().parse::<SocketAddr>() {
            Ok(addr) => addr,
            Err(err) => {
                tracing::warn!(
                    "Invalid BIND='{}': {}. Falling back to {}",
                    value,
                    err,
                    default_bind
                );
                default_bind
            }
        },
        None => default_bind,
    };

    if allow_public_access || requested.ip().is_loopback() {
        return requested;
    }

    tracing::warn!(
        "Non-loopback bind {} requested without ALLOW_PUBLIC_ACCESS; forcing 127.0.0.1",
        requested
    );
    SocketAddr::from(([127, 0, 0, 1], requested.port()))
}

/// Whether an `Origin` header value points at this machine.
fn is_loopback_origin(origin: &str) -> bool {
    let Some((_, rest)) = origin.split_once("://") else {
        return false;
    };
    let authority = rest.split('/').next().unwrap_or_default();
    let host = if let Some(bracketed) = authority.strip_prefix('[') {
        bracketed.split(']').next().unwrap_or_default()
    } else {
        authority.split(':').next().unwrap_or_default()
    };
    host.eq_ignore_ascii_case("localhost")
        || host
            .parse::<IpAddr>()
            .map(|ip| ip.is_loopback())
            .unwrap_or(false)
}

fn cors_layer(allow_public_access: bool) -> CorsLayer {
    let origins = if allow_public_access {
        AllowOrigin::any()
    } else {
        AllowOrigin::predicate(|origin: &HeaderValue, _parts: &Parts| {
            origin.to_str().map(is_loopback_origin).unwrap_or(false)
        })
    };
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// Create the application router with all routes and middleware.
///
/// # Arguments
/// - `state`: Shared application state.
/// - `allow_public_access`: Whether to allow cross-origin requests from any origin.
pub fn create_app(state: AppState, allow_public_access: bool) -> Router {
    let body_limit = state.config.max_paste_size;

    Router::new()
        .route("/set", post(handlers::paste::create_paste))
        .route("/:url", get(handlers::paste::get_paste))
        .with_state(state)
        .layer(
            tower::ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors_layer(allow_public_access))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                )),
        )
}

/// Run the Axum server with graceful shutdown support.
///
/// # Errors
/// Returns any I/O error produced by `axum::serve`.
pub async fn serve_router(
    listener: tokio::net::TcpListener,
    state: AppState,
    allow_public_access: bool,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let app = create_app(state, allow_public_access);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}

#[cfg(test)]
mod tests {
    use super::{is_loopback_origin, resolve_bind_address_from};
    use snippy_core::Config;
    use std::net::SocketAddr;

    fn config_with_port(port: u16) -> Config {
        Config {
            db_path: String::from("/tmp/snippy-db"),
            port,
            ..Config::default()
        }
    }

    #[test]
    fn resolve_bind_address_enforces_loopback_when_public_access_disabled() {
        let config = config_with_port(4040);
        let resolved =
            resolve_bind_address_from(Some("0.0.0.0:4040".to_string()), &config, false);
        assert_eq!(resolved, SocketAddr::from(([127, 0, 0, 1], 4040)));
    }

    #[test]
    fn resolve_bind_address_allows_public_bind_when_enabled() {
        let config = config_with_port(4040);
        let resolved = resolve_bind_address_from(Some("0.0.0.0:4040".to_string()), &config, true);
        assert_eq!(resolved, SocketAddr::from(([0, 0, 0, 0], 4040)));
    }

    #[test]
    fn resolve_bind_address_defaults_and_invalid_fallback() {
        let config = config_with_port(4041);
        let expected = SocketAddr::from(([127, 0, 0, 1], 4041));
        assert_eq!(resolve_bind_address_from(None, &config, false), expected);
        assert_eq!(
            resolve_bind_address_from(Some("bad:host".to_string()), &config, false),
            expected
        );
    }

    #[test]
    fn loopback_origin_matrix() {
        let cases = [
            ("http://localhost:3000", true),
            ("http://127.0.0.1", true),
            ("http://127.0.0.2:5000", true),
            ("http://[::1]:8080", true),
            ("https://localhost", true),
            ("https://evil.example", false),
            ("http://localhost.evil.example", false),
            ("null", false),
        ];
        for (origin, expected) in cases {
            assert_eq!(is_loopback_origin(origin), expected, "origin: {}", origin);
        }
    }
}
