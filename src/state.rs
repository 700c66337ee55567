use std::sync::Arc;
use crate::domain::ports::{
    CategoryRepository, EventRepository, LocationRepository, Notifier, RatingRepository,
    RegistrationRepository, SessionRepository, UserRepository,
};
use crate::domain::services::{
    auth_service::AuthService, popularity::PopularityScorer, registration_service::RegistrationService,
};
use crate::config::Config;

/// Backend-specific repository handles, all sharing one pool.
#[derive(Clone)]
pub struct Repositories {
    pub user_repo: Arc<dyn UserRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub session_repo: Arc<dyn SessionRepository>,
    pub registration_repo: Arc<dyn RegistrationRepository>,
    pub rating_repo: Arc<dyn RatingRepository>,
    pub category_repo: Arc<dyn CategoryRepository>,
    pub location_repo: Arc<dyn LocationRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub session_repo: Arc<dyn SessionRepository>,
    pub registration_repo: Arc<dyn RegistrationRepository>,
    pub rating_repo: Arc<dyn RatingRepository>,
    pub category_repo: Arc<dyn CategoryRepository>,
    pub location_repo: Arc<dyn LocationRepository>,
    pub auth_service: Arc<AuthService>,
    pub notifier: Arc<dyn Notifier>,
    pub popularity: Arc<PopularityScorer>,
    pub registration_service: Arc<RegistrationService>,
}

impl AppState {
    pub fn new(config: Config, repos: Repositories, notifier: Arc<dyn Notifier>) -> Self {
        let auth_service = Arc::new(AuthService::new(&config));

        let popularity = Arc::new(PopularityScorer::new(
            repos.event_repo.clone(),
            repos.registration_repo.clone(),
            repos.rating_repo.clone(),
        ));

        let registration_service = Arc::new(RegistrationService::new(
            repos.event_repo.clone(),
            repos.registration_repo.clone(),
            notifier.clone(),
            popularity.clone(),
        ));

        Self {
            config,
            user_repo: repos.user_repo,
            event_repo: repos.event_repo,
            session_repo: repos.session_repo,
            registration_repo: repos.registration_repo,
            rating_repo: repos.rating_repo,
            category_repo: repos.category_repo,
            location_repo: repos.location_repo,
            auth_service,
            notifier,
            popularity,
            registration_service,
        }
    }
}
