//! Product reviews.

use crate::ids::{ProductId, ReviewId, UserId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Highest star rating a review can carry.
pub const MAX_RATING: u8 = 5;

/// A shopper's review of a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReview {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_id: Option<ReviewId>,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(
        default,
        deserialize_with = "crate::time::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
}

impl ProductReview {
    pub fn new(user_id: UserId, product_id: ProductId, rating: u8) -> Self {
        Self {
            user_id,
            product_id,
            rating: rating.min(MAX_RATING),
            ..Default::default()
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// Mean rating of the given reviews, or `None` when there are none.
pub fn average_rating(reviews: &[ProductReview]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    Some(f64::from(sum) / reviews.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_is_clamped() {
        let review = ProductReview::new(UserId::new(1), ProductId::new(2), 9);
        assert_eq!(review.rating, MAX_RATING);
    }

    #[test]
    fn test_average_rating() {
        assert_eq!(average_rating(&[]), None);
        let reviews = vec![
            ProductReview::new(UserId::new(1), ProductId::new(2), 4),
            ProductReview::new(UserId::new(2), ProductId::new(2), 5),
        ];
        assert_eq!(average_rating(&reviews), Some(4.5));
    }

    #[test]
    fn test_deserialize_backend_shape() {
        let json = r#"{"reviewId":7,"userId":1,"productId":3,"rating":4,
            "comment":"Good","createdAt":"2024-05-01T10:00:00"}"#;
        let review: ProductReview = serde_json::from_str(json).unwrap();
        assert_eq!(review.review_id, Some(ReviewId::new(7)));
        assert!(review.created_at.is_some());
    }
}
