//! `/cart` endpoints.

use crate::{ApiClient, FetchError};
use serde_json::json;
use techmart_catalog::cart::{Cart, CartItem};
use techmart_catalog::ids::{CartId, CartItemId, ProductId, UserId};

#[derive(Clone, Copy)]
pub struct CartService<'a> {
    client: &'a ApiClient,
}

impl<'a> CartService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// The user's cart, created by the backend on first access.
    pub async fn for_user(&self, user_id: UserId) -> Result<Cart, FetchError> {
        self.client
            .fetch(self.client.get(format!("cart/user/{}", user_id)))
            .await
    }

    pub async fn items(&self, cart_id: CartId) -> Result<Vec<CartItem>, FetchError> {
        self.client
            .fetch(self.client.get(format!("cart/items/{}", cart_id)))
            .await
    }

    /// Add `quantity` of a product. Parameters travel in the query string.
    pub async fn add(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<Cart, FetchError> {
        let request = self
            .client
            .post("cart/add")
            .query("userId", user_id)
            .query("productId", product_id)
            .query("quantity", quantity);
        self.client.fetch(request).await
    }

    pub async fn update_item(
        &self,
        cart_id: CartId,
        cart_item_id: CartItemId,
        quantity: i64,
    ) -> Result<CartItem, FetchError> {
        let request = self
            .client
            .put(format!("cart/{}/items/{}", cart_id, cart_item_id))
            .json(&json!({ "quantity": quantity }))?;
        self.client.fetch(request).await
    }

    pub async fn remove_item(
        &self,
        cart_id: CartId,
        cart_item_id: CartItemId,
    ) -> Result<(), FetchError> {
        self.client
            .execute(
                self.client
                    .delete(format!("cart/{}/items/{}", cart_id, cart_item_id)),
            )
            .await
    }

    pub async fn clear(&self, cart_id: CartId) -> Result<(), FetchError> {
        self.client
            .execute(self.client.delete(format!("cart/{}/items", cart_id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::{ApiClient, Method};
    use serde_json::json;
    use techmart_catalog::ids::{CartId, ProductId, UserId};

    #[tokio::test]
    async fn test_add_uses_query_params() {
        let (client, mock) = ApiClient::mock("http://mock/api");
        mock.respond_json(Method::Post, "/api/cart/add", json!({"cartId": 5, "userId": 7}));

        let cart = client
            .cart()
            .add(UserId::new(7), ProductId::new(3), 2)
            .await
            .unwrap();
        assert_eq!(cart.resolved_id(), Some(CartId::new(5)));

        let sent = &mock.requests()[0];
        assert_eq!(sent.query_value("userId"), Some("7"));
        assert_eq!(sent.query_value("productId"), Some("3"));
        assert_eq!(sent.query_value("quantity"), Some("2"));
        assert_eq!(sent.body, None);
    }

    #[tokio::test]
    async fn test_clear_reports_failure() {
        let (client, mock) = ApiClient::mock("http://mock/api");
        mock.respond(Method::Delete, "/api/cart/5/items", 403, "Forbidden");
        let err = client.cart().clear(CartId::new(5)).await.unwrap_err();
        assert!(err.is_validation());
    }
}
