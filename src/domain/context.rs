//! Request Context
//!
//! Metadata about the current request, carried into services for tracing.

use std::net::IpAddr;
use uuid::Uuid;

/// Context for a request, used for log correlation.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Correlation ID for request tracing
    pub correlation_id: Uuid,

    /// Client IP address
    pub client_ip: Option<IpAddr>,
}

impl RequestContext {
    /// Create a context with a fresh correlation ID
    pub fn new() -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            client_ip: None,
        }
    }

    /// Create context with correlation ID
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = correlation_id;
        self
    }

    /// Create context with client IP
    pub fn with_client_ip(mut self, ip: IpAddr) -> Self {
        self.client_ip = Some(ip);
        self
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
