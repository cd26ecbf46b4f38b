use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    Bkash,
    Nagad,
    Cash,
}

impl PaymentMethod {
    pub fn is_gateway(&self) -> bool {
        !matches!(self, PaymentMethod::Cash)
    }

    pub fn as_db_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "CARD",
            PaymentMethod::Bkash => "BKASH",
            PaymentMethod::Nagad => "NAGAD",
            PaymentMethod::Cash => "CASH",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "CARD" => Some(PaymentMethod::Card),
            "BKASH" => Some(PaymentMethod::Bkash),
            "NAGAD" => Some(PaymentMethod::Nagad),
            "CASH" => Some(PaymentMethod::Cash),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentKind {
    Donation,
    MonthlyFee,
}

impl PaymentKind {
    pub fn settled_status(&self) -> PaymentStatus {
        match self {
            PaymentKind::Donation => PaymentStatus::Succeeded,
            PaymentKind::MonthlyFee => PaymentStatus::Paid,
        }
    }

    pub fn as_db_str(&self) -> &'static str {
        match self {
            PaymentKind::Donation => "DONATION",
            PaymentKind::MonthlyFee => "MONTHLY_FEE",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "DONATION" => Some(PaymentKind::Donation),
            "MONTHLY_FEE" => Some(PaymentKind::MonthlyFee),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Initiated,
    Succeeded,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PaymentStatus::Initiated)
    }

    pub fn as_db_str(&self) -> &'static str {
        match self {
            PaymentStatus::Initiated => "INITIATED",
            PaymentStatus::Succeeded => "SUCCEEDED",
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Failed => "FAILED",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "INITIATED" => Some(PaymentStatus::Initiated),
            "SUCCEEDED" => Some(PaymentStatus::Succeeded),
            "PAID" => Some(PaymentStatus::Paid),
            "FAILED" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }
}

/// Provider-reported view of a transaction, returned by the validator endpoint
/// and cross-checked against the stored record before any transition.
#[derive(Debug, Clone)]
pub struct ProviderCheck {
    pub status: String,
    pub amount_minor: Option<i64>,
    pub currency: Option<String>,
    pub raw: serde_json::Value,
}

impl ProviderCheck {
    pub fn reports_valid(&self) -> bool {
        matches!(self.status.as_str(), "VALID" | "VALIDATED")
    }
}

#[derive(Debug, Clone)]
pub struct TransitionInput {
    pub status: PaymentStatus,
    pub kind: PaymentKind,
    pub amount_minor: i64,
    pub currency: String,
    pub credits_campaign: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackClaim {
    Success,
    Failure,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionPlan {
    AlreadySettled,
    Settle {
        to: PaymentStatus,
        credit_minor: Option<i64>,
    },
    Fail {
        reason: String,
    },
}

/// Single transition table shared by every callback path (success, fail,
/// cancel, IPN). A claimed success settles only when the provider's own
/// verification reports VALID and the amount and currency match the stored
/// record exactly; the credit, when any, is always the stored amount.
pub fn plan_callback_transition(
    record: &TransitionInput,
    claim: CallbackClaim,
    validation: Option<&ProviderCheck>,
) -> TransitionPlan {
    if record.status.is_terminal() {
        return TransitionPlan::AlreadySettled;
    }

    match claim {
        CallbackClaim::Failure => TransitionPlan::Fail {
            reason: "provider reported failure".to_string(),
        },
        CallbackClaim::Cancelled => TransitionPlan::Fail {
            reason: "cancelled by payer".to_string(),
        },
        CallbackClaim::Success => {
            let check = match validation {
                Some(c) => c,
                None => {
                    return TransitionPlan::Fail {
                        reason: "callback not verified with provider".to_string(),
                    }
                }
            };

            if !check.reports_valid() {
                return TransitionPlan::Fail {
                    reason: format!("provider verification returned {}", check.status),
                };
            }

            if check.amount_minor != Some(record.amount_minor) {
                return TransitionPlan::Fail {
                    reason: format!(
                        "amount mismatch: provider reported {:?}, record holds {}",
                        check.amount_minor, record.amount_minor
                    ),
                };
            }

            if check.currency.as_deref() != Some(record.currency.as_str()) {
                return TransitionPlan::Fail {
                    reason: format!(
                        "currency mismatch: provider reported {:?}, record holds {}",
                        check.currency, record.currency
                    ),
                };
            }

            TransitionPlan::Settle {
                to: record.kind.settled_status(),
                credit_minor: record.credits_campaign.then_some(record.amount_minor),
            }
        }
    }
}

/// Parses a provider decimal-string amount ("500", "500.5", "500.00") into
/// minor units. Anything negative, empty, or with more than two decimal
/// places is rejected so it can never compare equal to a stored amount.
pub fn parse_amount_minor(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() || s.starts_with('-') || s.starts_with('+') {
        return None;
    }

    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if whole.is_empty() || frac.len() > 2 {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let whole: i64 = whole.parse().ok()?;
    let frac_minor = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().ok()? * 10,
        _ => frac.parse::<i64>().ok()?,
    };

    whole.checked_mul(100)?.checked_add(frac_minor)
}

pub fn format_amount_minor(amount_minor: i64) -> String {
    format!("{}.{:02}", amount_minor / 100, amount_minor % 100)
}

#[derive(Debug, Clone, Deserialize)]
pub struct InitiateDonationRequest {
    pub amount_minor: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub method: PaymentMethod,
    pub campaign_slug: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InitiateFeeRequest {
    pub amount_minor: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub method: PaymentMethod,
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OfflineDonationRequest {
    pub amount_minor: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub payer_id: Option<Uuid>,
    pub payer_email: Option<String>,
    pub campaign_slug: Option<String>,
    pub note: Option<String>,
}

fn default_currency() -> String {
    "BDT".to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct InitiatePaymentResponse {
    pub payment_id: Uuid,
    pub status: PaymentStatus,
    pub redirect_url: Option<String>,
    pub pending_path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentView {
    pub payment_id: Uuid,
    pub tran_ref: String,
    pub kind: PaymentKind,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub amount_minor: i64,
    pub currency: String,
    pub campaign_id: Option<Uuid>,
    pub note: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}
