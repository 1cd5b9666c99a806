use std::time::Duration;

use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
};

/// Login: one request replenished every 500ms, bursts of 10
pub const AUTH_REPLENISH_MS: u64 = 500;
pub const AUTH_BURST_SIZE: u32 = 10;

/// Unauthenticated household endpoints (registration, lookup, self-service edits)
pub const PUBLIC_REPLENISH_MS: u64 = 200;
pub const PUBLIC_BURST_SIZE: u32 = 30;

/// Everything behind authentication
pub const GENERAL_REPLENISH_MS: u64 = 50;
pub const GENERAL_BURST_SIZE: u32 = 100;

/// Build a per-client-IP `GovernorLayer`.
///
/// The client IP comes from `X-Forwarded-For`/`X-Real-IP`/`Forwarded`, falling
/// back to the peer address, so the server must be started with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
#[macro_export]
macro_rules! make_rate_limit_layer {
    ($replenish_ms:expr, $burst:expr) => {{
        let config = ::tower_governor::governor::GovernorConfigBuilder::default()
            .per_millisecond($replenish_ms)
            .burst_size($burst)
            .key_extractor(::tower_governor::key_extractor::SmartIpKeyExtractor)
            .use_headers()
            .finish()
            .expect("rate limit quota must be non-zero");
        ::tower_governor::GovernorLayer::new(config)
    }};
}

/// Constant delay so response time does not reveal whether a username exists
pub async fn timing_safe_middleware(req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    response
}

pub fn apply_timing_safe<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn(timing_safe_middleware))
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use axum::{
        body::Body,
        extract::ConnectInfo,
        http::{Request, StatusCode},
        routing::get,
    };
    use tower::ServiceExt;

    use super::*;

    fn request() -> Request<Body> {
        let mut request = Request::builder()
            .uri("/limited")
            .header("x-forwarded-for", "203.0.113.7")
            .body(Body::empty())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 8080))));
        request
    }

    #[tokio::test]
    async fn test_burst_is_enforced() {
        let app = Router::new()
            .route("/limited", get(|| async { "ok" }))
            .layer(crate::make_rate_limit_layer!(60_000, 2));

        // clones share the limiter state
        for _ in 0..2 {
            let response = app.clone().oneshot(request()).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
        let response = app.oneshot(request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
