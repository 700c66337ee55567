use std::sync::Arc;
use tracing::{debug, warn};
use crate::domain::ports::{EventRepository, RatingRepository, RegistrationRepository};
use crate::domain::services::rating::RatingSummary;
use crate::error::AppError;

pub const REGISTRATION_WEIGHT: f64 = 0.7;
pub const RATING_WEIGHT: f64 = 0.3;

pub fn popularity_score(total_registrations: i64, mean_rating: f64) -> f64 {
    REGISTRATION_WEIGHT * total_registrations as f64 + RATING_WEIGHT * mean_rating
}

pub struct PopularityScorer {
    event_repo: Arc<dyn EventRepository>,
    registration_repo: Arc<dyn RegistrationRepository>,
    rating_repo: Arc<dyn RatingRepository>,
}

impl PopularityScorer {
    pub fn new(
        event_repo: Arc<dyn EventRepository>,
        registration_repo: Arc<dyn RegistrationRepository>,
        rating_repo: Arc<dyn RatingRepository>,
    ) -> Self {
        Self { event_repo, registration_repo, rating_repo }
    }

    /// Recomputes the score from current rows and persists it.
    pub async fn recompute(&self, event_id: &str) -> Result<f64, AppError> {
        let total_registrations = self.registration_repo.count_by_event(event_id).await?;
        let ratings = self.rating_repo.list_by_event(event_id).await?;
        let summary = RatingSummary::from_ratings(&ratings);

        let score = popularity_score(total_registrations, summary.mean);
        self.event_repo.update_popularity(event_id, score).await?;

        debug!(event_id = %event_id, score, "Popularity score updated");
        Ok(score)
    }

    /// Never fails the caller; a lost update is repaired by the next write.
    pub async fn refresh(&self, event_id: &str) {
        if let Err(e) = self.recompute(event_id).await {
            warn!(event_id = %event_id, "Failed to update popularity score: {}", e);
        }
    }
}
