pub mod config;
pub mod domain {
    pub mod payment;
    pub mod principal;
    pub mod tran_ref;
}
pub mod gateways;
pub mod http {
    pub mod handlers {
        pub mod announcements;
        pub mod callbacks;
        pub mod campaigns;
        pub mod events;
        pub mod fees;
        pub mod members;
        pub mod payments;
        pub mod reports;
    }
    pub mod middleware {
        pub mod admin_auth;
    }
}
pub mod repo {
    pub mod announcements_repo;
    pub mod campaigns_repo;
    pub mod events_repo;
    pub mod members_repo;
    pub mod payments_repo;
    pub mod reports_repo;
}
pub mod service {
    pub mod payment_service;
}

#[derive(Clone)]
pub struct AppState {
    pub payment_service: service::payment_service::PaymentService,
    pub payments_repo: repo::payments_repo::PaymentsRepo,
    pub campaigns_repo: repo::campaigns_repo::CampaignsRepo,
    pub members_repo: repo::members_repo::MembersRepo,
    pub announcements_repo: repo::announcements_repo::AnnouncementsRepo,
    pub events_repo: repo::events_repo::EventsRepo,
    pub reports_repo: repo::reports_repo::ReportsRepo,
}
