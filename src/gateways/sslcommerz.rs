use crate::domain::payment::{format_amount_minor, parse_amount_minor, ProviderCheck};
use crate::gateways::{GatewayError, InitiateOutcome, InitiateRequest, PaymentProvider};
use serde_json::Value;

pub struct SslcommerzProvider {
    pub base_url: String,
    pub store_id: String,
    pub store_passwd: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

#[async_trait::async_trait]
impl PaymentProvider for SslcommerzProvider {
    fn name(&self) -> &'static str {
        "sslcommerz"
    }

    async fn initiate(&self, request: &InitiateRequest) -> Result<InitiateOutcome, GatewayError> {
        if self.store_id.is_empty() || self.store_passwd.is_empty() {
            return Err(GatewayError::Misconfigured);
        }

        let session_url = format!("{}/gwprocess/v4/api.php", self.base_url);
        let form = session_form(&self.store_id, &self.store_passwd, request);

        let resp = self
            .client
            .post(session_url)
            .form(&form)
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await
            .map_err(map_transport_error)?;

        if !resp.status().is_success() {
            return Err(GatewayError::Request(format!(
                "HTTP_{}",
                resp.status().as_u16()
            )));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;
        decode_session_response(&body)
    }

    async fn validate(&self, val_id: &str) -> Result<ProviderCheck, GatewayError> {
        if self.store_id.is_empty() || self.store_passwd.is_empty() {
            return Err(GatewayError::Misconfigured);
        }

        let url = format!("{}/validator/api/validationserverAPI.php", self.base_url);
        let resp = self
            .client
            .get(url)
            .query(&[
                ("val_id", val_id),
                ("store_id", self.store_id.as_str()),
                ("store_passwd", self.store_passwd.as_str()),
                ("format", "json"),
            ])
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await
            .map_err(map_transport_error)?;

        if !resp.status().is_success() {
            return Err(GatewayError::Request(format!(
                "HTTP_{}",
                resp.status().as_u16()
            )));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;
        Ok(decode_validation_response(body))
    }
}

fn session_form(
    store_id: &str,
    store_passwd: &str,
    request: &InitiateRequest,
) -> Vec<(&'static str, String)> {
    let mut form = vec![
        ("store_id", store_id.to_string()),
        ("store_passwd", store_passwd.to_string()),
        ("total_amount", format_amount_minor(request.amount_minor)),
        ("currency", request.currency.clone()),
        ("tran_id", request.tran_ref.clone()),
        ("success_url", request.success_url.clone()),
        ("fail_url", request.fail_url.clone()),
        ("cancel_url", request.cancel_url.clone()),
        ("ipn_url", request.ipn_url.clone()),
        ("cus_name", request.payer_name.clone()),
        ("cus_email", request.payer_email.clone()),
        ("product_name", request.product_name.clone()),
        ("product_category", "charity".to_string()),
        ("product_profile", "non-physical-goods".to_string()),
        ("shipping_method", "NO".to_string()),
        ("multi_card_name", request.method_hint.clone()),
        ("value_a", request.passthrough.payment_id.to_string()),
        ("value_b", request.passthrough.payer_id.to_string()),
    ];

    if let Some(phone) = &request.payer_phone {
        form.push(("cus_phone", phone.clone()));
    }
    if let Some(campaign_id) = request.passthrough.campaign_id {
        form.push(("value_c", campaign_id.to_string()));
    }
    if let Some(note) = &request.passthrough.note {
        form.push(("value_d", note.clone()));
    }

    form
}

pub fn decode_session_response(body: &Value) -> Result<InitiateOutcome, GatewayError> {
    let status = body.get("status").and_then(Value::as_str).unwrap_or("");
    if status != "SUCCESS" {
        let reason = body
            .get("failedreason")
            .and_then(Value::as_str)
            .unwrap_or("no reason given");
        return Err(GatewayError::Declined(reason.to_string()));
    }

    let redirect_url = body
        .get("GatewayPageURL")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| GatewayError::Declined("missing redirect url".to_string()))?;

    Ok(InitiateOutcome {
        redirect_url: redirect_url.to_string(),
        session_key: body
            .get("sessionkey")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

pub fn decode_validation_response(body: Value) -> ProviderCheck {
    ProviderCheck {
        status: body
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("INVALID")
            .to_string(),
        amount_minor: body
            .get("amount")
            .and_then(Value::as_str)
            .and_then(parse_amount_minor),
        currency: body
            .get("currency")
            .and_then(Value::as_str)
            .map(str::to_string),
        raw: body,
    }
}

fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Request(e.to_string())
    }
}
