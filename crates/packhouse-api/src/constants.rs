/// Path the OpenAPI document is served at; the docs UI loads it from here.
pub const OPENAPI_JSON_PATH: &str = "/api/openapi.json";

/// Seconds between SSE keep-alive comments.
pub const SSE_KEEP_ALIVE_SECS: u64 = 15;

pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
