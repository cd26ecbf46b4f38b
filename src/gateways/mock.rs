use crate::domain::payment::ProviderCheck;
use crate::gateways::{GatewayError, InitiateOutcome, InitiateRequest, PaymentProvider};

pub struct MockProvider {
    pub behavior: String,
    pub validation_status: String,
    pub validation_amount_minor: Option<i64>,
    pub validation_currency: Option<String>,
}

#[async_trait::async_trait]
impl PaymentProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn initiate(&self, request: &InitiateRequest) -> Result<InitiateOutcome, GatewayError> {
        match self.behavior.as_str() {
            "DECLINE" => Err(GatewayError::Declined("mock decline".to_string())),
            "TIMEOUT" => Err(GatewayError::Timeout),
            "MISCONFIGURED" => Err(GatewayError::Misconfigured),
            _ => Ok(InitiateOutcome {
                redirect_url: format!("https://mock.gateway/pay/{}", request.tran_ref),
                session_key: Some(format!("mock_session_{}", request.passthrough.payment_id)),
            }),
        }
    }

    async fn validate(&self, _val_id: &str) -> Result<ProviderCheck, GatewayError> {
        Ok(ProviderCheck {
            status: self.validation_status.clone(),
            amount_minor: self.validation_amount_minor,
            currency: self.validation_currency.clone(),
            raw: serde_json::json!({"mock": true}),
        })
    }
}
