use crate::env::flag_or;

/// Behavior switches for the HTTP surface.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// When set, a failed delete still answers `200 OK` with the failure
    /// message, which is what existing clients expect. Otherwise the response
    /// carries the status of the underlying error.
    pub lenient_delete_errors: bool,
    /// Expose Prometheus metrics at `/metrics`.
    pub metrics_enabled: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            lenient_delete_errors: true,
            metrics_enabled: true,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            lenient_delete_errors: flag_or("LENIENT_DELETE_ERRORS", defaults.lenient_delete_errors),
            metrics_enabled: flag_or("METRICS_ENABLED", defaults.metrics_enabled),
        }
    }
}
