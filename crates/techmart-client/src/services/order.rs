//! `/orders` endpoints.

use crate::{ApiClient, FetchError};
use techmart_catalog::checkout::{
    CreateOrderRequest, Order, OrderItem, OrderResponse, OrderStatus, StatusHistoryEntry,
};
use techmart_catalog::ids::{OrderId, UserId};

#[derive(Clone, Copy)]
pub struct OrderService<'a> {
    client: &'a ApiClient,
}

impl<'a> OrderService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, request: &CreateOrderRequest) -> Result<OrderResponse, FetchError> {
        let request = self.client.put("orders/createOrder").json(request)?;
        self.client.fetch(request).await
    }

    pub async fn find(&self, id: OrderId) -> Result<Order, FetchError> {
        let request = self.client.get("orders/findById").query("id", id);
        self.client.fetch(request).await
    }

    pub async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<(), FetchError> {
        let request = self
            .client
            .put("orders/updateOrderStatus")
            .query("orderId", id)
            .query("status", status.code());
        self.client.execute(request).await
    }

    pub async fn by_user(&self, user_id: UserId) -> Result<Vec<Order>, FetchError> {
        let request = self.client.get("orders/byUserId").query("userId", user_id);
        self.client.fetch(request).await
    }

    /// Cancel an order. The backend exposes this as a GET.
    pub async fn cancel(&self, id: OrderId) -> Result<(), FetchError> {
        let request = self.client.get("orders/cancelOrder").query("orderId", id);
        self.client.execute(request).await
    }

    pub async fn items(&self, id: OrderId) -> Result<Vec<OrderItem>, FetchError> {
        let request = self.client.get("orders/orderItems").query("orderId", id);
        self.client.fetch(request).await
    }

    pub async fn total_amount(&self, id: OrderId) -> Result<f64, FetchError> {
        let request = self.client.get("orders/totalAmount").query("orderId", id);
        self.client.fetch(request).await
    }

    pub async fn search(&self, keyword: &str) -> Result<Vec<Order>, FetchError> {
        let request = self.client.get("orders/search").query("keyword", keyword);
        self.client.fetch(request).await
    }

    pub async fn by_status(&self, status: OrderStatus) -> Result<Vec<Order>, FetchError> {
        let request = self
            .client
            .get("orders/byStatus")
            .query("status", status.code());
        self.client.fetch(request).await
    }

    pub async fn by_user_and_status(
        &self,
        user_id: UserId,
        status: OrderStatus,
    ) -> Result<Vec<Order>, FetchError> {
        let request = self
            .client
            .get("orders/byUserIdAndStatus")
            .query("userId", user_id)
            .query("status", status.code());
        self.client.fetch(request).await
    }

    /// Every order in the shop (admin).
    pub async fn list_all(&self) -> Result<Vec<Order>, FetchError> {
        self.client.fetch(self.client.get("orders/list")).await
    }

    pub async fn status_history(&self, id: OrderId) -> Result<Vec<StatusHistoryEntry>, FetchError> {
        self.client
            .fetch(self.client.get(format!("orders/{}/status-history", id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::{ApiClient, Method};
    use serde_json::json;
    use techmart_catalog::checkout::OrderStatus;
    use techmart_catalog::ids::{OrderId, UserId};

    #[tokio::test]
    async fn test_update_status_sends_code() {
        let (client, mock) = ApiClient::mock("http://mock/api");
        mock.respond(Method::Put, "/api/orders/updateOrderStatus", 200, "");
        client
            .orders()
            .update_status(OrderId::new(12), OrderStatus::Shipped)
            .await
            .unwrap();
        let sent = &mock.requests()[0];
        assert_eq!(sent.query_value("orderId"), Some("12"));
        assert_eq!(sent.query_value("status"), Some("2"));
    }

    #[tokio::test]
    async fn test_by_user_and_status() {
        let (client, mock) = ApiClient::mock("http://mock/api");
        mock.respond_json(
            Method::Get,
            "/api/orders/byUserIdAndStatus",
            json!([{"id": 1, "userId": 3, "status": 3, "totalAmount": 500000,
                    "shippingAddress": "a, b, c"}]),
        );
        let orders = client
            .orders()
            .by_user_and_status(UserId::new(3), OrderStatus::Delivered)
            .await
            .unwrap();
        assert_eq!(orders[0].status(), Some(OrderStatus::Delivered));
    }

    #[tokio::test]
    async fn test_total_amount_is_bare_number() {
        let (client, mock) = ApiClient::mock("http://mock/api");
        mock.respond(Method::Get, "/api/orders/totalAmount", 200, "1250000.0");
        let total = client.orders().total_amount(OrderId::new(1)).await.unwrap();
        assert_eq!(total, 1_250_000.0);
    }
}
