use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    adapters::outbound::postgres::{
        PostgresDirectory, PostgresEntryStore, PostgresMembershipRepository,
        PostgresPreferenceRepository, PostgresTimeEntryRepository,
    },
    auth::AuthSettings,
    domain::{
        ports::inbound::{
            DirectoryService, MembershipService, PreferenceService, ReportService,
            TimeEntryService,
        },
        services::{
            DirectoryServiceImpl, MembershipServiceImpl, PreferenceServiceImpl,
            ReportServiceImpl, TimeEntryServiceImpl,
        },
    },
};

#[derive(Clone)]
pub struct AppState {
    pub report_service: Arc<dyn ReportService>,
    pub time_entry_service: Arc<dyn TimeEntryService>,
    pub directory_service: Arc<dyn DirectoryService>,
    pub membership_service: Arc<dyn MembershipService>,
    pub preference_service: Arc<dyn PreferenceService>,
    pub auth: AuthSettings,
    pub currency_symbol: Arc<str>,
}

impl AppState {
    /// Wires every service to its PostgreSQL adapters.
    pub fn new(db_pool: PgPool, auth: AuthSettings, currency_symbol: &str) -> Self {
        let entry_store = Arc::new(PostgresEntryStore::new(db_pool.clone()));
        let directory = Arc::new(PostgresDirectory::new(db_pool.clone()));
        let memberships = Arc::new(PostgresMembershipRepository::new(db_pool.clone()));
        let time_entries = Arc::new(PostgresTimeEntryRepository::new(db_pool.clone()));
        let preferences = Arc::new(PostgresPreferenceRepository::new(db_pool));

        Self {
            report_service: Arc::new(ReportServiceImpl::new(
                entry_store.clone(),
                directory.clone(),
            )),
            time_entry_service: Arc::new(TimeEntryServiceImpl::new(
                time_entries,
                entry_store,
                directory.clone(),
                memberships.clone(),
            )),
            directory_service: Arc::new(DirectoryServiceImpl::new(directory.clone())),
            membership_service: Arc::new(MembershipServiceImpl::new(memberships, directory)),
            preference_service: Arc::new(PreferenceServiceImpl::new(preferences)),
            auth,
            currency_symbol: Arc::from(currency_symbol),
        }
    }
}

#[cfg(test)]
impl AppState {
    /// Every service backed by one in-memory store.
    pub fn in_memory(backend: crate::domain::ports::outbound::mock::MockBackend) -> Self {
        let backend = Arc::new(backend);

        Self {
            report_service: Arc::new(ReportServiceImpl::new(backend.clone(), backend.clone())),
            time_entry_service: Arc::new(TimeEntryServiceImpl::new(
                backend.clone(),
                backend.clone(),
                backend.clone(),
                backend.clone(),
            )),
            directory_service: Arc::new(DirectoryServiceImpl::new(backend.clone())),
            membership_service: Arc::new(MembershipServiceImpl::new(
                backend.clone(),
                backend.clone(),
            )),
            preference_service: Arc::new(PreferenceServiceImpl::new(backend)),
            auth: AuthSettings {
                user_header: axum::http::HeaderName::from_static("x-user-id"),
                dev_user_id: None,
            },
            currency_symbol: Arc::from("EUR"),
        }
    }
}
