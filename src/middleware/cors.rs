//! CORS policy for browser clients.
//!
//! Note:
//! - CORS is enforced by browsers. Server-to-server calls are not restricted by it.
//! - This middleware should be applied at the Router level (not inside handlers).
//!
//! Policy:
//! - Origins: exact-match allowlist from Config (`FRONT_URL` + local dev servers).
//!   A `*` entry allows every origin; the request's `Origin` is echoed back.
//! - Credentials: allowed.
//! - Methods / headers: any. With credentials a literal `*` is not honored by
//!   browsers, so whatever the preflight asks for is mirrored back instead.

use axum::Router;
use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use url::Url;

use crate::config::Config;

/// Allow-everything marker for methods and headers; realized by mirroring
/// the preflight's `Access-Control-Request-*` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wildcard;

impl Wildcard {
    fn methods(self) -> AllowMethods {
        AllowMethods::mirror_request()
    }

    fn headers(self) -> AllowHeaders {
        AllowHeaders::mirror_request()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsPolicy {
    pub allow_origins: Vec<String>,
    pub allow_credentials: bool,
    pub allow_methods: Wildcard,
    pub allow_headers: Wildcard,
}

impl CorsPolicy {
    pub fn new(allow_origins: Vec<String>) -> Self {
        Self {
            allow_origins,
            allow_credentials: true,
            allow_methods: Wildcard,
            allow_headers: Wildcard,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cors_allowed_origins.clone())
    }

    fn allows_any_origin(&self) -> bool {
        self.allow_origins.iter().any(|origin| origin == "*")
    }

    /// Origins in the form the CORS engine can match against.
    ///
    /// Entries that are not valid header values are skipped with a warning.
    /// `*` never goes into the exact-match list (see [`CorsPolicy::layer`]).
    fn header_origins(&self) -> Vec<HeaderValue> {
        self.allow_origins
            .iter()
            .filter(|origin| *origin != "*")
            .filter_map(|origin| {
                warn_if_not_bare_origin(origin);
                match HeaderValue::from_str(origin) {
                    Ok(v) => Some(v),
                    Err(_) => {
                        tracing::warn!(origin = %origin, "ignoring CORS origin that is not a valid header value");
                        None
                    }
                }
            })
            .collect()
    }

    pub fn layer(&self) -> CorsLayer {
        // With credentials a literal `*` is invalid, so any origin is echoed.
        let allow_origin = if self.allows_any_origin() {
            tracing::warn!("CORS allowlist contains `*`; every origin is allowed with credentials");
            AllowOrigin::mirror_request()
        } else {
            AllowOrigin::list(self.header_origins())
        };

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_credentials(self.allow_credentials)
            .allow_methods(self.allow_methods.methods())
            .allow_headers(self.allow_headers.headers())
    }
}

// Browsers send `scheme://host[:port]` with no path, so e.g. a trailing `/`
// can never match. The origin is still kept.
fn warn_if_not_bare_origin(origin: &str) {
    let serialized = Url::parse(origin).map(|url| url.origin().ascii_serialization());
    match serialized {
        Ok(bare) if bare == origin => {}
        Ok(bare) => {
            tracing::warn!(origin = %origin, expected = %bare, "CORS origin will not match browser Origin headers")
        }
        Err(err) => tracing::warn!(origin = %origin, error = %err, "CORS origin is not a URL"),
    }
}

/// Apply the CORS policy to the given Router.
pub fn apply(router: Router, policy: &CorsPolicy) -> Router {
    tracing::info!(origins = ?policy.allow_origins, "CORS allowlist");
    router.layer(policy.layer())
}
