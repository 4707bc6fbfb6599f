// ABOUTME: HTTP middleware for request tracing and cross-origin access
// ABOUTME: Provides request ID propagation, request spans and the CORS layer

/// Cross-origin resource sharing
pub mod cors;
/// Request IDs and request spans
pub mod tracing;

// CORS configuration
pub use cors::setup_cors;

// Request tracing
pub use self::tracing::{create_request_span, request_id_middleware, RequestId, REQUEST_ID_HEADER};
