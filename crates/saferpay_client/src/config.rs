use error_stack::ResultExt;
use masking::Secret;
use serde::Deserialize;
use url::Url;

use crate::{
    consts,
    errors::{ClientError, CustomResult},
};

/// Merchant-level gateway configuration.
///
/// Field names match the gateway config the checkout stores per payment
/// method.
#[derive(Clone, Debug, Deserialize)]
pub struct SaferpayConfig {
    pub username: Secret<String>,
    pub password: Secret<String>,
    pub customer_id: String,
    pub terminal_id: String,
    #[serde(default)]
    pub sandbox: bool,
    /// When set, captures stay deferred until an explicit capture call;
    /// otherwise an authorized payment is captured right after assert.
    #[serde(default)]
    pub use_authorize: bool,
    /// Payment method allow-list forwarded on initialize; empty means the
    /// terminal default.
    #[serde(default)]
    pub allowed_payment_methods: Vec<String>,
    /// Overrides the environment-derived API base. Must end with a trailing
    /// slash for relative endpoint paths to resolve under it.
    #[serde(default)]
    pub base_url: Option<Url>,
}

impl SaferpayConfig {
    /// API base for the configured environment.
    pub fn api_base(&self) -> CustomResult<Url, ClientError> {
        if let Some(base) = &self.base_url {
            return Ok(base.clone());
        }
        let raw = if self.sandbox {
            consts::SANDBOX_BASE_URL
        } else {
            consts::PRODUCTION_BASE_URL
        };
        Url::parse(raw).change_context(ClientError::FailedToObtainIntegrationUrl)
    }

    /// Absolute URL of an endpoint path.
    pub fn endpoint(&self, path: &str) -> CustomResult<Url, ClientError> {
        self.api_base()?
            .join(path)
            .change_context(ClientError::FailedToObtainIntegrationUrl)
    }
}
