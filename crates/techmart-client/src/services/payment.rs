//! `/order-payment` endpoints.
//!
//! Only the gateway URL is requested here; redirecting the shopper to it is
//! the caller's business.

use crate::{ApiClient, FetchError, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use techmart_catalog::ids::OrderId;

/// What a payment is for. Orders take precedence over bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentRef {
    Order(OrderId),
    Booking(i64),
}

impl PaymentRef {
    /// Prefer the order id; fall back to a booking id.
    pub fn pick(order_id: Option<OrderId>, booking_id: Option<i64>) -> Option<Self> {
        order_id
            .map(PaymentRef::Order)
            .or_else(|| booking_id.map(PaymentRef::Booking))
    }

    fn apply(self, request: RequestBuilder) -> RequestBuilder {
        match self {
            PaymentRef::Order(id) => request.query("orderId", id),
            PaymentRef::Booking(id) => request.query("bookingId", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentStatusResponse {
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct PaymentService<'a> {
    client: &'a ApiClient,
}

impl<'a> PaymentService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Ask the backend for a gateway URL. The body is plain text.
    pub async fn create_payment_url(
        &self,
        target: PaymentRef,
        amount: f64,
    ) -> Result<String, FetchError> {
        let request = self
            .client
            .get("order-payment/createPayment")
            .query("amount", amount);
        let url = self.client.fetch_text(target.apply(request)).await?;
        Ok(url.trim().to_string())
    }

    /// Forward the gateway's return parameters for verification.
    pub async fn verify_return(
        &self,
        params: &BTreeMap<String, String>,
    ) -> Result<String, FetchError> {
        let request = self.client.post("order-payment/vnpay-return").json(params)?;
        self.client.fetch_text(request).await
    }

    pub async fn check_status(
        &self,
        target: PaymentRef,
    ) -> Result<PaymentStatusResponse, FetchError> {
        let request = self.client.get("order-payment/checkPaymentStatus");
        self.client.fetch(target.apply(request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Method;

    #[test]
    fn test_pick_prefers_order() {
        assert_eq!(
            PaymentRef::pick(Some(OrderId::new(1)), Some(9)),
            Some(PaymentRef::Order(OrderId::new(1)))
        );
        assert_eq!(PaymentRef::pick(None, Some(9)), Some(PaymentRef::Booking(9)));
        assert_eq!(PaymentRef::pick(None, None), None);
    }

    #[tokio::test]
    async fn test_create_payment_url_is_text() {
        let (client, mock) = ApiClient::mock("http://mock/api");
        mock.respond(
            Method::Get,
            "/api/order-payment/createPayment",
            200,
            "https://sandbox.vnpayment.vn/pay?vnp_TxnRef=12\n",
        );

        let url = client
            .payments()
            .create_payment_url(PaymentRef::Order(OrderId::new(12)), 530_000.0)
            .await
            .unwrap();
        assert_eq!(url, "https://sandbox.vnpayment.vn/pay?vnp_TxnRef=12");

        let sent = &mock.requests()[0];
        assert_eq!(sent.query_value("orderId"), Some("12"));
        assert_eq!(sent.query_value("amount"), Some("530000"));
        assert_eq!(sent.query_value("bookingId"), None);
    }
}
