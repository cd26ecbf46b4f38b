use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use charity_portal::config::AppConfig;
use charity_portal::gateways::sslcommerz::SslcommerzProvider;
use charity_portal::repo::announcements_repo::AnnouncementsRepo;
use charity_portal::repo::campaigns_repo::CampaignsRepo;
use charity_portal::repo::events_repo::EventsRepo;
use charity_portal::repo::members_repo::MembersRepo;
use charity_portal::repo::payments_repo::PaymentsRepo;
use charity_portal::repo::reports_repo::ReportsRepo;
use charity_portal::service::payment_service::PaymentService;
use charity_portal::AppState;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&cfg.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let payments_repo = PaymentsRepo { pool: pool.clone() };
    let campaigns_repo = CampaignsRepo { pool: pool.clone() };
    let members_repo = MembersRepo { pool: pool.clone() };
    let announcements_repo = AnnouncementsRepo { pool: pool.clone() };
    let events_repo = EventsRepo { pool: pool.clone() };
    let reports_repo = ReportsRepo { pool: pool.clone() };

    let provider = Arc::new(SslcommerzProvider {
        base_url: cfg.sslcommerz_base_url.clone(),
        store_id: cfg.sslcommerz_store_id.clone(),
        store_passwd: cfg.sslcommerz_store_passwd.clone(),
        timeout_ms: cfg.gateway_timeout_ms,
        client: reqwest::Client::new(),
    });

    let payment_service = PaymentService {
        pool: pool.clone(),
        payments_repo: payments_repo.clone(),
        campaigns_repo: campaigns_repo.clone(),
        members_repo: members_repo.clone(),
        provider,
        public_base_url: cfg.public_base_url.clone(),
    };

    let state = AppState {
        payment_service,
        payments_repo,
        campaigns_repo,
        members_repo,
        announcements_repo,
        events_repo,
        reports_repo,
    };

    let admin_key = cfg.internal_api_key.clone();
    let admin_routes = Router::new()
        .route(
            "/campaigns",
            post(charity_portal::http::handlers::campaigns::create_campaign),
        )
        .route(
            "/payments/offline",
            post(charity_portal::http::handlers::payments::record_offline_donation),
        )
        .route(
            "/members",
            get(charity_portal::http::handlers::members::list_members),
        )
        .route(
            "/members/:member_id/approve",
            post(charity_portal::http::handlers::members::approve),
        )
        .route(
            "/members/:member_id/reject",
            post(charity_portal::http::handlers::members::reject),
        )
        .route(
            "/announcements",
            post(charity_portal::http::handlers::announcements::create_announcement),
        )
        .route(
            "/events",
            post(charity_portal::http::handlers::events::create_event),
        )
        .route(
            "/reports/finance",
            get(charity_portal::http::handlers::reports::finance_summary),
        )
        .layer(from_fn_with_state(
            admin_key,
            charity_portal::http::middleware::admin_auth::require_internal_api_key,
        ));

    let app = Router::new()
        .route("/health", get(charity_portal::http::handlers::payments::health))
        .route(
            "/donations",
            post(charity_portal::http::handlers::payments::initiate_donation),
        )
        .route(
            "/fees",
            post(charity_portal::http::handlers::payments::initiate_fee),
        )
        .route(
            "/payments/:payment_id",
            get(charity_portal::http::handlers::payments::get_payment),
        )
        .route(
            "/me/payments",
            get(charity_portal::http::handlers::payments::list_my_payments),
        )
        .route(
            "/payments/callback/success",
            post(charity_portal::http::handlers::callbacks::success),
        )
        .route(
            "/payments/callback/fail",
            post(charity_portal::http::handlers::callbacks::fail),
        )
        .route(
            "/payments/callback/cancel",
            post(charity_portal::http::handlers::callbacks::cancel),
        )
        .route(
            "/payments/ipn",
            post(charity_portal::http::handlers::callbacks::ipn),
        )
        .route(
            "/campaigns",
            get(charity_portal::http::handlers::campaigns::list_campaigns),
        )
        .route(
            "/campaigns/:slug",
            get(charity_portal::http::handlers::campaigns::get_campaign),
        )
        .route(
            "/members/apply",
            post(charity_portal::http::handlers::members::apply),
        )
        .route(
            "/members/:member_id/fees",
            get(charity_portal::http::handlers::fees::list_paid_months),
        )
        .route(
            "/announcements",
            get(charity_portal::http::handlers::announcements::list_announcements),
        )
        .route(
            "/events",
            get(charity_portal::http::handlers::events::list_events),
        )
        .merge(admin_routes)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
