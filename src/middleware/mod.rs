/*
 * Responsibility
 * - Router-level middleware (CORS, security headers, request id / tracing / limits)
 * - Each module exposes `apply(router, ...)` so app.rs only chains them
 */
pub mod cors;
pub mod http;
pub mod security_headers;
