use crate::domain::payment::ProviderCheck;
use uuid::Uuid;

pub mod mock;
pub mod sslcommerz;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("provider credentials are not configured")]
    Misconfigured,
    #[error("provider request timed out")]
    Timeout,
    #[error("provider request failed: {0}")]
    Request(String),
    #[error("provider declined session: {0}")]
    Declined(String),
}

/// Opaque pass-through fields carried to the provider and echoed back on
/// every callback, so a callback can be tied to its record without state.
#[derive(Debug, Clone)]
pub struct Passthrough {
    pub payment_id: Uuid,
    pub payer_id: Uuid,
    pub campaign_id: Option<Uuid>,
    pub note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct InitiateRequest {
    pub amount_minor: i64,
    pub currency: String,
    pub tran_ref: String,
    pub product_name: String,
    pub method_hint: String,
    pub payer_name: String,
    pub payer_email: String,
    pub payer_phone: Option<String>,
    pub success_url: String,
    pub fail_url: String,
    pub cancel_url: String,
    pub ipn_url: String,
    pub passthrough: Passthrough,
}

#[derive(Debug, Clone)]
pub struct InitiateOutcome {
    pub redirect_url: String,
    pub session_key: Option<String>,
}

#[async_trait::async_trait]
pub trait PaymentProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn initiate(&self, request: &InitiateRequest) -> Result<InitiateOutcome, GatewayError>;

    async fn validate(&self, val_id: &str) -> Result<ProviderCheck, GatewayError>;
}
