//! `/reviews` endpoints.

use crate::{ApiClient, FetchError};
use techmart_catalog::ids::{ProductId, ReviewId, UserId};
use techmart_catalog::review::ProductReview;

#[derive(Clone, Copy)]
pub struct ReviewService<'a> {
    client: &'a ApiClient,
}

impl<'a> ReviewService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn for_product(&self, product_id: ProductId) -> Result<Vec<ProductReview>, FetchError> {
        self.client
            .fetch(self.client.get(format!("reviews/product/{}", product_id)))
            .await
    }

    pub async fn by_user(&self, user_id: UserId) -> Result<Vec<ProductReview>, FetchError> {
        self.client
            .fetch(self.client.get(format!("reviews/user/{}", user_id)))
            .await
    }

    pub async fn create(&self, review: &ProductReview) -> Result<ProductReview, FetchError> {
        let request = self.client.post("reviews").json(review)?;
        self.client.fetch(request).await
    }

    pub async fn update(
        &self,
        id: ReviewId,
        review: &ProductReview,
    ) -> Result<ProductReview, FetchError> {
        let request = self.client.put(format!("reviews/{}", id)).json(review)?;
        self.client.fetch(request).await
    }

    pub async fn delete(&self, id: ReviewId) -> Result<(), FetchError> {
        self.client
            .execute(self.client.delete(format!("reviews/{}", id)))
            .await
    }

    /// Server-side average; see `techmart_catalog::review::average_rating`
    /// for the local equivalent.
    pub async fn average_rating(&self, product_id: ProductId) -> Result<f64, FetchError> {
        self.client
            .fetch(
                self.client
                    .get(format!("reviews/product/{}/average-rating", product_id)),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::{ApiClient, Method};
    use serde_json::json;
    use techmart_catalog::ids::{ProductId, UserId};
    use techmart_catalog::review::ProductReview;

    #[tokio::test]
    async fn test_create_omits_server_fields() {
        let (client, mock) = ApiClient::mock("http://mock/api");
        mock.respond_json(
            Method::Post,
            "/api/reviews",
            json!({"reviewId": 4, "userId": 1, "productId": 2, "rating": 5, "comment": "ok"}),
        );

        let review = ProductReview::new(UserId::new(1), ProductId::new(2), 5).with_comment("ok");
        let saved = client.reviews().create(&review).await.unwrap();
        assert!(saved.review_id.is_some());

        let body = mock.requests()[0].body.clone().unwrap();
        assert!(body.get("reviewId").is_none());
        assert!(body.get("createdAt").is_none());
    }
}
