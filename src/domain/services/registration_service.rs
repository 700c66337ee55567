use std::sync::Arc;
use tracing::{error, info, warn};
use crate::domain::models::{
    event::Event,
    registration::{NewRegistrationParams, Registration, RegistrationNotice},
    user::User,
};
use crate::domain::ports::{EventRepository, Notifier, RegistrationRepository};
use crate::domain::services::{capacity, popularity::PopularityScorer};
use crate::error::AppError;

/// Contact details the registrant submits with the signup.
#[derive(Debug, Clone, Default)]
pub struct RegistrationInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub job: String,
    pub payment_method: Option<String>,
}

pub struct RegistrationService {
    event_repo: Arc<dyn EventRepository>,
    registration_repo: Arc<dyn RegistrationRepository>,
    notifier: Arc<dyn Notifier>,
    popularity: Arc<PopularityScorer>,
}

impl RegistrationService {
    pub fn new(
        event_repo: Arc<dyn EventRepository>,
        registration_repo: Arc<dyn RegistrationRepository>,
        notifier: Arc<dyn Notifier>,
        popularity: Arc<PopularityScorer>,
    ) -> Self {
        Self { event_repo, registration_repo, notifier, popularity }
    }

    /// Signs `user` up for the event. The seat claim and the registration row
    /// are committed only after every confirmation went out; a notifier
    /// failure rolls both back.
    pub async fn register(&self, user: Option<&User>, event_id: &str, input: RegistrationInput) -> Result<Registration, AppError> {
        let event = self.event_repo.find_by_id(event_id).await?
            .ok_or_else(|| AppError::NotFound("Event not found".into()))?;

        capacity::ensure_available(&event)?;

        let user = user.ok_or(AppError::Unauthorized)?;

        if self.registration_repo.find_by_user_and_event(&user.id, &event.id).await?.is_some() {
            return Err(AppError::Conflict("You are already registered for this event".into()));
        }

        let payment_method = input.payment_method
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        let payment_method = if event.is_free() {
            None
        } else {
            Some(payment_method.ok_or_else(|| AppError::Validation("Payment method is required for paid events".into()))?)
        };

        let registration = Registration::new(NewRegistrationParams {
            user_id: user.id.clone(),
            event_id: event.id.clone(),
            username: user.username.clone(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            job: input.job,
            payment_method,
        });

        let pending = self.registration_repo.reserve(&registration).await?;
        let notice = RegistrationNotice::new(&event, pending.registration());

        if let Err(e) = self.dispatch(&event, &notice).await {
            if let Err(rollback_err) = pending.rollback().await {
                error!("Rollback after notification failure failed: {:?}", rollback_err);
            }
            return Err(e);
        }

        let created = pending.commit().await?;
        info!(event_id = %event.id, user_id = %user.id, "Registration committed: {}", created.id);

        self.popularity.refresh(&event.id).await;
        Ok(created)
    }

    async fn dispatch(&self, event: &Event, notice: &RegistrationNotice) -> Result<(), AppError> {
        if !event.is_free() {
            self.notifier.send_payment_confirmation(notice).await
                .map_err(|e| dependency_failure("payment confirmation", e))?;
        }

        self.notifier.send(notice).await
            .map_err(|e| dependency_failure("registration confirmation", e))
    }
}

fn dependency_failure(what: &str, e: AppError) -> AppError {
    warn!("Failed to send {}: {}", what, e);
    let detail = match e {
        AppError::Dependency(msg) => msg,
        other => other.to_string(),
    };
    AppError::Dependency(format!("Failed to send {}: {}", what, detail))
}
