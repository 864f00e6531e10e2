//! API constants

/// Prefix every asset route is nested under
pub const API_PREFIX: &str = "/api/v0";

/// Where the generated OpenAPI document is served
pub const OPENAPI_PATH: &str = "/api/openapi.json";
