use crate::domain::payment::{
    plan_callback_transition, CallbackClaim, ErrorEnvelope, ErrorPayload, InitiateDonationRequest,
    InitiateFeeRequest, InitiatePaymentResponse, OfflineDonationRequest, PaymentKind,
    PaymentMethod, PaymentStatus, PaymentView, ProviderCheck, TransitionInput, TransitionPlan,
};
use crate::domain::principal::Principal;
use crate::domain::tran_ref;
use crate::gateways::{InitiateRequest, Passthrough, PaymentProvider};
use crate::repo::campaigns_repo::{Campaign, CampaignsRepo};
use crate::repo::members_repo::MembersRepo;
use crate::repo::payments_repo::{NewPayment, PaymentsRepo, StoredPayment};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct PaymentService {
    pub pool: PgPool,
    pub payments_repo: PaymentsRepo,
    pub campaigns_repo: CampaignsRepo,
    pub members_repo: MembersRepo,
    pub provider: Arc<dyn PaymentProvider>,
    pub public_base_url: String,
}

/// Which endpoint the provider hit. The three browser redirects and the IPN
/// converge on the same transition logic and differ only in the response the
/// handler renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackChannel {
    SuccessRedirect,
    FailRedirect,
    CancelRedirect,
    Ipn,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackPayload {
    pub status: Option<String>,
    pub tran_id: Option<String>,
    pub val_id: Option<String>,
    pub amount: Option<String>,
    pub currency: Option<String>,
    pub value_a: Option<String>,
    pub value_b: Option<String>,
    pub value_c: Option<String>,
    pub value_d: Option<String>,
}

#[derive(Debug, Clone)]
pub enum CallbackOutcome {
    Settled {
        payment_id: Uuid,
        tran_ref: String,
        to: PaymentStatus,
    },
    Failed {
        payment_id: Uuid,
        tran_ref: String,
        reason: String,
    },
    Duplicate {
        payment_id: Uuid,
        tran_ref: String,
    },
    Unknown,
}

impl PaymentService {
    pub async fn initiate_donation(
        &self,
        principal: Principal,
        req: InitiateDonationRequest,
    ) -> Result<InitiatePaymentResponse, (StatusCode, ErrorEnvelope)> {
        if req.amount_minor <= 0 {
            return Err((
                StatusCode::BAD_REQUEST,
                err("INVALID_AMOUNT", "amount_minor must be > 0"),
            ));
        }

        let campaign = match &req.campaign_slug {
            Some(slug) => Some(self.resolve_campaign(slug).await?),
            None => None,
        };

        let product_name = campaign
            .as_ref()
            .map(|c| c.title.clone())
            .unwrap_or_else(|| "general donation".to_string());

        self.initiate(
            principal,
            PaymentKind::Donation,
            req.method,
            req.amount_minor,
            req.currency,
            campaign.map(|c| c.campaign_id),
            None,
            None,
            req.note,
            product_name,
        )
        .await
    }

    pub async fn initiate_fee(
        &self,
        principal: Principal,
        req: InitiateFeeRequest,
    ) -> Result<InitiatePaymentResponse, (StatusCode, ErrorEnvelope)> {
        if req.amount_minor <= 0 {
            return Err((
                StatusCode::BAD_REQUEST,
                err("INVALID_AMOUNT", "amount_minor must be > 0"),
            ));
        }
        if !(1..=12).contains(&req.month) {
            return Err((
                StatusCode::BAD_REQUEST,
                err("INVALID_MONTH", "month must be between 1 and 12"),
            ));
        }

        // Monthly fees are payable by approved members only.
        let member = self
            .members_repo
            .find_by_id(principal.id)
            .await
            .map_err(internal)?;
        if !member.map(|m| m.is_approved()).unwrap_or(false) {
            return Err((
                StatusCode::FORBIDDEN,
                err(
                    "MEMBER_NOT_APPROVED",
                    "monthly fees require an approved membership",
                ),
            ));
        }

        let paid = self
            .payments_repo
            .paid_fee_months(principal.id, req.year)
            .await
            .map_err(internal)?;
        if paid.iter().any(|(m, _)| *m == req.month as i32) {
            return Err((
                StatusCode::CONFLICT,
                err("FEE_ALREADY_PAID", "fee for this month is already paid"),
            ));
        }

        let product_name = format!("monthly fee {:02}/{}", req.month, req.year);
        self.initiate(
            principal,
            PaymentKind::MonthlyFee,
            req.method,
            req.amount_minor,
            req.currency,
            None,
            Some(req.month as i32),
            Some(req.year),
            None,
            product_name,
        )
        .await
    }

    #[allow(clippy::too_many_arguments)]
    async fn initiate(
        &self,
        principal: Principal,
        kind: PaymentKind,
        method: PaymentMethod,
        amount_minor: i64,
        currency: String,
        campaign_id: Option<Uuid>,
        fee_month: Option<i32>,
        fee_year: Option<i32>,
        note: Option<String>,
        product_name: String,
    ) -> Result<InitiatePaymentResponse, (StatusCode, ErrorEnvelope)> {
        let payment_id = Uuid::new_v4();
        let now = chrono::Utc::now();
        let tran_ref = tran_ref::build(payment_id, now);

        let record = NewPayment {
            payment_id,
            tran_ref: tran_ref.clone(),
            kind,
            method,
            status: PaymentStatus::Initiated,
            amount_minor,
            currency: currency.clone(),
            payer_id: principal.id,
            campaign_id,
            fee_month,
            fee_year,
            note: note.clone(),
            metadata: json!({}),
        };
        self.payments_repo.insert(&record).await.map_err(internal)?;

        if !method.is_gateway() {
            return Ok(pending_response(payment_id));
        }

        let request = InitiateRequest {
            amount_minor,
            currency,
            tran_ref: tran_ref.clone(),
            product_name,
            method_hint: method_hint(method).to_string(),
            payer_name: principal.email.clone(),
            payer_email: principal.email.clone(),
            payer_phone: None,
            success_url: format!("{}/payments/callback/success", self.public_base_url),
            fail_url: format!("{}/payments/callback/fail", self.public_base_url),
            cancel_url: format!("{}/payments/callback/cancel", self.public_base_url),
            ipn_url: format!("{}/payments/ipn", self.public_base_url),
            passthrough: Passthrough {
                payment_id,
                payer_id: principal.id,
                campaign_id,
                note,
            },
        };

        match self.provider.initiate(&request).await {
            Ok(outcome) => {
                if let Some(session_key) = &outcome.session_key {
                    self.payments_repo
                        .merge_metadata(payment_id, json!({ "session_key": session_key }))
                        .await
                        .map_err(internal)?;
                }
                Ok(InitiatePaymentResponse {
                    payment_id,
                    status: PaymentStatus::Initiated,
                    redirect_url: Some(outcome.redirect_url),
                    pending_path: None,
                })
            }
            Err(e) => {
                // Degrade to manual reconciliation: the record stays INITIATED
                // and the payer lands on the pending page.
                tracing::warn!(%payment_id, error = %e, "gateway initiation failed, record left pending");
                self.payments_repo
                    .merge_metadata(payment_id, json!({ "initiation_error": e.to_string() }))
                    .await
                    .map_err(internal)?;
                Ok(pending_response(payment_id))
            }
        }
    }

    pub async fn handle_callback(
        &self,
        channel: CallbackChannel,
        payload: CallbackPayload,
    ) -> anyhow::Result<CallbackOutcome> {
        let payment_id = match resolve_payment_id(&payload) {
            Some(id) => id,
            None => {
                tracing::warn!(tran_id = ?payload.tran_id, "callback carries no resolvable record id");
                return Ok(CallbackOutcome::Unknown);
            }
        };

        let record = match self.payments_repo.find_by_id(payment_id).await? {
            Some(r) => r,
            None => {
                tracing::warn!(%payment_id, "callback references unknown payment record");
                return Ok(CallbackOutcome::Unknown);
            }
        };

        let status = PaymentStatus::from_db_str(&record.status)
            .ok_or_else(|| anyhow::anyhow!("stored status {} is not recognized", record.status))?;
        let kind = PaymentKind::from_db_str(&record.kind)
            .ok_or_else(|| anyhow::anyhow!("stored kind {} is not recognized", record.kind))?;

        if status.is_terminal() {
            return Ok(CallbackOutcome::Duplicate {
                payment_id,
                tran_ref: record.tran_ref,
            });
        }

        let claim = claim_for(channel, payload.status.as_deref());
        let validation = if claim == CallbackClaim::Success {
            self.verify_with_provider(&payload).await
        } else {
            None
        };

        let input = TransitionInput {
            status,
            kind,
            amount_minor: record.amount_minor,
            currency: record.currency.clone(),
            credits_campaign: record.campaign_id.is_some(),
        };

        match plan_callback_transition(&input, claim, validation.as_ref()) {
            TransitionPlan::AlreadySettled => Ok(CallbackOutcome::Duplicate {
                payment_id,
                tran_ref: record.tran_ref,
            }),
            TransitionPlan::Fail { reason } => {
                let patch = json!({
                    "failure_reason": reason,
                    "callback_status": payload.status,
                    "val_id": payload.val_id,
                });
                let transitioned = self.payments_repo.fail_if_initiated(payment_id, patch).await?;
                if transitioned {
                    Ok(CallbackOutcome::Failed {
                        payment_id,
                        tran_ref: record.tran_ref,
                        reason,
                    })
                } else {
                    Ok(CallbackOutcome::Duplicate {
                        payment_id,
                        tran_ref: record.tran_ref,
                    })
                }
            }
            TransitionPlan::Settle { to, credit_minor } => {
                self.settle(&record, to, credit_minor, &payload, validation)
                    .await
            }
        }
    }

    /// The winning transition and the ledger credit commit together; the
    /// conditional update makes a lost race a no-op instead of a double
    /// credit.
    async fn settle(
        &self,
        record: &StoredPayment,
        to: PaymentStatus,
        credit_minor: Option<i64>,
        payload: &CallbackPayload,
        validation: Option<ProviderCheck>,
    ) -> anyhow::Result<CallbackOutcome> {
        let patch = json!({
            "val_id": payload.val_id,
            "validation": validation.map(|v| v.raw),
        });

        let mut tx = self.pool.begin().await?;
        let transitioned =
            PaymentsRepo::settle_if_initiated_tx(&mut tx, record.payment_id, to, patch).await?;
        if !transitioned {
            tx.rollback().await?;
            return Ok(CallbackOutcome::Duplicate {
                payment_id: record.payment_id,
                tran_ref: record.tran_ref.clone(),
            });
        }

        if let (Some(amount), Some(campaign_id)) = (credit_minor, record.campaign_id) {
            CampaignsRepo::increment_raised_tx(&mut tx, campaign_id, amount).await?;
        }
        tx.commit().await?;

        tracing::info!(payment_id = %record.payment_id, status = to.as_db_str(), "payment settled");
        Ok(CallbackOutcome::Settled {
            payment_id: record.payment_id,
            tran_ref: record.tran_ref.clone(),
            to,
        })
    }

    async fn verify_with_provider(&self, payload: &CallbackPayload) -> Option<ProviderCheck> {
        let val_id = payload.val_id.as_deref()?;
        match self.provider.validate(val_id).await {
            Ok(check) => Some(check),
            Err(e) => {
                tracing::warn!(val_id, error = %e, "provider verification call failed");
                None
            }
        }
    }

    pub async fn record_offline(
        &self,
        req: OfflineDonationRequest,
    ) -> Result<PaymentView, (StatusCode, ErrorEnvelope)> {
        if req.amount_minor <= 0 {
            return Err((
                StatusCode::BAD_REQUEST,
                err("INVALID_AMOUNT", "amount_minor must be > 0"),
            ));
        }

        let member = match (req.payer_id, req.payer_email.as_deref()) {
            (Some(id), _) => self.members_repo.find_by_id(id).await.map_err(internal)?,
            (None, Some(email)) => self
                .members_repo
                .find_by_email(email)
                .await
                .map_err(internal)?,
            (None, None) => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    err("MISSING_PAYER", "payer_id or payer_email is required"),
                ))
            }
        };
        let member = member.ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                err("PAYER_NOT_FOUND", "no member matches the given payer"),
            )
        })?;

        let campaign = match &req.campaign_slug {
            Some(slug) => Some(self.resolve_campaign(slug).await?),
            None => None,
        };
        let campaign_id = campaign.map(|c| c.campaign_id);

        let payment_id = Uuid::new_v4();
        let now = chrono::Utc::now();
        let record = NewPayment {
            payment_id,
            tran_ref: tran_ref::build(payment_id, now),
            kind: PaymentKind::Donation,
            method: PaymentMethod::Cash,
            status: PaymentStatus::Succeeded,
            amount_minor: req.amount_minor,
            currency: req.currency,
            payer_id: member.member_id,
            campaign_id,
            fee_month: None,
            fee_year: None,
            note: req.note,
            metadata: json!({ "recorded_offline": true }),
        };

        let mut tx = self.pool.begin().await.map_err(|e| internal(e.into()))?;
        PaymentsRepo::insert_tx(&mut tx, &record)
            .await
            .map_err(internal)?;
        if let Some(campaign_id) = campaign_id {
            CampaignsRepo::increment_raised_tx(&mut tx, campaign_id, req.amount_minor)
                .await
                .map_err(internal)?;
        }
        tx.commit().await.map_err(|e| internal(e.into()))?;

        Ok(PaymentView {
            payment_id,
            tran_ref: record.tran_ref,
            kind: record.kind,
            method: record.method,
            status: record.status,
            amount_minor: record.amount_minor,
            currency: record.currency,
            campaign_id,
            note: record.note,
            created_at: now,
        })
    }

    pub async fn list_payer_payments(
        &self,
        payer_id: Uuid,
    ) -> Result<Vec<PaymentView>, (StatusCode, ErrorEnvelope)> {
        let records = self
            .payments_repo
            .list_by_payer(payer_id)
            .await
            .map_err(internal)?;

        records
            .into_iter()
            .map(|r| to_view(r).map_err(internal))
            .collect()
    }

    pub async fn get_payment(
        &self,
        payment_id: Uuid,
    ) -> Result<PaymentView, (StatusCode, ErrorEnvelope)> {
        let record = self
            .payments_repo
            .find_by_id(payment_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| {
                (
                    StatusCode::NOT_FOUND,
                    err("PAYMENT_NOT_FOUND", "no payment record with this id"),
                )
            })?;

        to_view(record).map_err(internal)
    }

    async fn resolve_campaign(&self, slug: &str) -> Result<Campaign, (StatusCode, ErrorEnvelope)> {
        self.campaigns_repo
            .find_by_slug(slug)
            .await
            .map_err(internal)?
            .ok_or_else(|| {
                (
                    StatusCode::NOT_FOUND,
                    err("CAMPAIGN_NOT_FOUND", "no campaign with this slug"),
                )
            })
    }
}

pub fn to_view(record: StoredPayment) -> anyhow::Result<PaymentView> {
    Ok(PaymentView {
        payment_id: record.payment_id,
        tran_ref: record.tran_ref,
        kind: PaymentKind::from_db_str(&record.kind)
            .ok_or_else(|| anyhow::anyhow!("stored kind {} is not recognized", record.kind))?,
        method: PaymentMethod::from_db_str(&record.method)
            .ok_or_else(|| anyhow::anyhow!("stored method {} is not recognized", record.method))?,
        status: PaymentStatus::from_db_str(&record.status)
            .ok_or_else(|| anyhow::anyhow!("stored status {} is not recognized", record.status))?,
        amount_minor: record.amount_minor,
        currency: record.currency,
        campaign_id: record.campaign_id,
        note: record.note,
        created_at: record.created_at,
    })
}

fn resolve_payment_id(payload: &CallbackPayload) -> Option<Uuid> {
    if let Some(id) = payload.value_a.as_deref().and_then(|v| Uuid::parse_str(v).ok()) {
        return Some(id);
    }
    payload.tran_id.as_deref().and_then(tran_ref::parse)
}

fn claim_for(channel: CallbackChannel, reported_status: Option<&str>) -> CallbackClaim {
    match channel {
        CallbackChannel::SuccessRedirect => CallbackClaim::Success,
        CallbackChannel::FailRedirect => CallbackClaim::Failure,
        CallbackChannel::CancelRedirect => CallbackClaim::Cancelled,
        CallbackChannel::Ipn => match reported_status {
            Some("VALID") | Some("VALIDATED") => CallbackClaim::Success,
            Some("CANCELLED") => CallbackClaim::Cancelled,
            _ => CallbackClaim::Failure,
        },
    }
}

fn method_hint(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Card => "brac_visa,mastercard",
        PaymentMethod::Bkash => "bkash",
        PaymentMethod::Nagad => "nagad",
        PaymentMethod::Cash => "",
    }
}

fn pending_response(payment_id: Uuid) -> InitiatePaymentResponse {
    InitiatePaymentResponse {
        payment_id,
        status: PaymentStatus::Initiated,
        redirect_url: None,
        pending_path: Some(format!("/payments/{payment_id}/pending")),
    }
}

fn err(code: &str, message: &str) -> ErrorEnvelope {
    ErrorEnvelope {
        error: ErrorPayload {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        },
    }
}

fn internal(e: anyhow::Error) -> (StatusCode, ErrorEnvelope) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        err("INTERNAL_ERROR", &e.to_string()),
    )
}
