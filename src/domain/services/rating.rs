use std::collections::HashSet;
use serde::Serialize;
use crate::domain::models::rating::{Rating, MAX_RATING, MIN_RATING};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingSummary {
    /// Unrounded mean, used for popularity scoring.
    #[serde(skip)]
    pub mean: f64,
    pub average_rating: f64,
    pub unique_raters: i64,
}

impl RatingSummary {
    pub fn from_ratings(ratings: &[Rating]) -> Self {
        if ratings.is_empty() {
            return Self { mean: 0.0, average_rating: 0.0, unique_raters: 0 };
        }

        let sum: i64 = ratings.iter().map(|r| i64::from(r.rating)).sum();
        let mean = sum as f64 / ratings.len() as f64;
        let unique_raters = ratings.iter()
            .map(|r| r.user_id.as_str())
            .collect::<HashSet<_>>()
            .len() as i64;

        Self { mean, average_rating: round_to_cents(mean), unique_raters }
    }
}

/// Two decimal places, halves rounded away from zero.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn validate_score(rating: i32) -> Result<(), AppError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(AppError::Validation(format!("Rating must be between {} and {}", MIN_RATING, MAX_RATING)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(user: &str, score: i32) -> Rating {
        Rating::new(user.to_string(), "event-1".to_string(), score)
    }

    #[test]
    fn test_empty_summary() {
        let summary = RatingSummary::from_ratings(&[]);
        assert_eq!(summary.average_rating, 0.0);
        assert_eq!(summary.unique_raters, 0);
    }

    #[test]
    fn test_average_of_three_ratings() {
        let summary = RatingSummary::from_ratings(&[rating("a", 3), rating("b", 4), rating("c", 5)]);
        assert_eq!(summary.average_rating, 4.00);
        assert_eq!(summary.unique_raters, 3);
    }

    #[test]
    fn test_average_is_rounded_to_two_decimals() {
        let summary = RatingSummary::from_ratings(&[rating("a", 4), rating("b", 4), rating("c", 5)]);
        assert_eq!(summary.average_rating, 4.33);
        assert!((summary.mean - 13.0 / 3.0).abs() < 1e-12);

        let summary = RatingSummary::from_ratings(&[rating("a", 5), rating("b", 5), rating("c", 4)]);
        assert_eq!(summary.average_rating, 4.67);
    }

    #[test]
    fn test_duplicate_rows_count_one_rater() {
        let summary = RatingSummary::from_ratings(&[rating("a", 2), rating("a", 4), rating("b", 3)]);
        assert_eq!(summary.unique_raters, 2);
        assert_eq!(summary.average_rating, 3.00);
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to_cents(2.125), 2.13);
        assert_eq!(round_to_cents(1.0), 1.0);
        assert_eq!(round_to_cents(3.333333), 3.33);
    }

    #[test]
    fn test_validate_score() {
        assert!(validate_score(1).is_ok());
        assert!(validate_score(5).is_ok());
        assert!(matches!(validate_score(0), Err(AppError::Validation(_))));
        assert!(matches!(validate_score(6), Err(AppError::Validation(_))));
    }
}
