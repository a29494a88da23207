//! Fetches that combine several endpoints.
//!
//! Dependent steps are sequential `.await`s; independent fetches fan out
//! with `try_join_all`, which fails as soon as any branch fails. The one
//! exception is the ordered-products report, where a missing product
//! degrades to a placeholder row.

use crate::{ApiClient, FetchError, PaymentRef};
use futures::future::{join_all, try_join_all};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use techmart_catalog::cart::{Cart, CartLine, CartSummary};
use techmart_catalog::catalog::Product;
use techmart_catalog::checkout::{CheckoutDraft, OrderResponse, OrderedProduct};
use techmart_catalog::ids::{CategoryId, ProductId, UserId};
use techmart_catalog::search::{group_products, Facet, ProductFilters, ProductGroup, VariantFamily};
use techmart_catalog::CatalogError;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// A user's cart joined to current product data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub cart: Cart,
    pub lines: Vec<CartLine>,
    pub summary: CartSummary,
}

/// A placed order and where to pay for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOutcome {
    pub order: OrderResponse,
    pub payment_url: String,
}

/// Checkout can fail before sending (validation) or while sending.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckoutError {
    #[error(transparent)]
    Invalid(#[from] CatalogError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Distinct ids, in first-seen order.
fn distinct(ids: impl IntoIterator<Item = ProductId>) -> Vec<ProductId> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

impl ApiClient {
    /// A product and its variant family. The group fetch depends on the
    /// product's group code, so the two requests run in sequence.
    #[instrument(skip(self))]
    pub async fn product_and_variants(&self, id: ProductId) -> Result<VariantFamily, FetchError> {
        let product = self.products().get(id).await?;
        let Some(code) = product.group_code().map(str::to_string) else {
            return Ok(VariantFamily::standalone(product));
        };
        let group = self.products().by_group(&code).await?;
        debug!(group = %code, variants = group.len(), "fetched variant family");
        Ok(VariantFamily::from_group(product, group))
    }

    /// Cart, then its items, then every product in parallel.
    #[instrument(skip(self, asset_origin))]
    pub async fn cart_view(&self, user_id: UserId, asset_origin: &str) -> Result<CartView, FetchError> {
        let cart = self.cart().for_user(user_id).await?;
        let Some(cart_id) = cart.resolved_id() else {
            return Ok(CartView {
                cart,
                lines: Vec::new(),
                summary: CartSummary::default(),
            });
        };

        let items = self.cart().items(cart_id).await?;
        let ids = distinct(items.iter().map(|i| i.product_id));
        let service = self.products();
        let products = try_join_all(ids.iter().map(|id| service.get(*id))).await?;
        let by_id: HashMap<ProductId, Product> = ids.into_iter().zip(products).collect();

        let lines: Vec<CartLine> = items
            .iter()
            .map(|item| CartLine::join(item, by_id.get(&item.product_id), asset_origin))
            .collect();
        let summary = CartSummary::of(&lines);
        Ok(CartView {
            cart,
            lines,
            summary,
        })
    }

    /// Admin report: one row per order line across every order.
    ///
    /// Order and item fetches fail fast. Each distinct product is fetched
    /// once; a product that fails to load yields placeholder text instead of
    /// failing the report.
    #[instrument(skip(self))]
    pub async fn ordered_products(&self) -> Result<Vec<OrderedProduct>, FetchError> {
        let order_service = self.orders();
        let orders = order_service.list_all().await?;
        let with_ids: Vec<_> = orders
            .iter()
            .filter_map(|o| o.id.map(|id| (o, id)))
            .collect();
        let items = try_join_all(with_ids.iter().map(|(_, id)| order_service.items(*id))).await?;

        let product_service = self.products();
        let ids = distinct(items.iter().flatten().map(|i| i.product_id));
        let fetched = join_all(ids.iter().map(|id| async move {
            match product_service.get(*id).await {
                Ok(product) => Some(product),
                Err(e) => {
                    warn!(product_id = %id, error = %e, "product lookup failed, using placeholder");
                    None
                }
            }
        }))
        .await;
        let by_id: HashMap<ProductId, Option<Product>> = ids.into_iter().zip(fetched).collect();

        let mut rows = Vec::new();
        for ((order, _), lines) in with_ids.iter().zip(&items) {
            for item in lines {
                let product = by_id.get(&item.product_id).and_then(Option::as_ref);
                rows.push(OrderedProduct::build(order, item, product));
            }
        }
        Ok(rows)
    }

    /// Fetch a category and run the listing engine over it.
    #[instrument(skip(self, filters, facets))]
    pub async fn category_groups(
        &self,
        category_id: CategoryId,
        filters: &ProductFilters,
        facets: &[Facet],
    ) -> Result<Vec<ProductGroup>, FetchError> {
        let products = self.products().by_category(category_id).await?;
        Ok(group_products(&products, filters, facets))
    }

    /// Validate the draft, create the order, then request its payment URL.
    #[instrument(skip(self, draft), fields(user = %draft.user_id))]
    pub async fn checkout(&self, draft: &CheckoutDraft) -> Result<CheckoutOutcome, CheckoutError> {
        let request = draft.to_request()?;
        let order = self.orders().create(&request).await?;
        let payment_url = self
            .payments()
            .create_payment_url(PaymentRef::Order(order.id), request.total_amount)
            .await?;
        Ok(CheckoutOutcome { order, payment_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Method;
    use serde_json::json;
    use techmart_catalog::checkout::{CheckoutItem, ShippingAddress};

    #[tokio::test]
    async fn test_product_without_group_stands_alone() {
        let (client, mock) = ApiClient::mock("http://mock/api");
        mock.respond_json(
            Method::Get,
            "/api/products/5",
            json!({"id": 5, "productName": "Mouse", "price": 250000}),
        );

        let family = client.product_and_variants(ProductId::new(5)).await.unwrap();
        assert_eq!(family.variants.len(), 1);
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_group_failure_propagates() {
        let (client, mock) = ApiClient::mock("http://mock/api");
        mock.respond_json(
            Method::Get,
            "/api/products/1",
            json!({"id": 1, "productName": "G14", "groupCode": "G14"}),
        );
        mock.respond(Method::Get, "/api/products/group/G14", 500, "down");

        let err = client.product_and_variants(ProductId::new(1)).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_checkout_validates_before_sending() {
        let (client, mock) = ApiClient::mock("http://mock/api");
        let draft = CheckoutDraft::new(
            UserId::new(1),
            vec![],
            ShippingAddress::new("12 Nguyen Trai street", "Q1", "HCM"),
        );
        let err = client.checkout(&draft).await.unwrap_err();
        assert_eq!(err, CheckoutError::Invalid(CatalogError::EmptyCheckout));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_creates_order_then_payment() {
        let (client, mock) = ApiClient::mock("http://mock/api");
        mock.respond_json(
            Method::Put,
            "/api/orders/createOrder",
            json!({"id": 31, "message": "ok"}),
        );
        mock.respond(
            Method::Get,
            "/api/order-payment/createPayment",
            200,
            "https://pay.example/31",
        );

        let item = CheckoutItem {
            product_id: ProductId::new(2),
            name: "Mouse".into(),
            image: None,
            quantity: 2,
            price: 250_000.0,
            selected: true,
        };
        let draft = CheckoutDraft::new(
            UserId::new(1),
            vec![item],
            ShippingAddress::new("12 Nguyen Trai street", "Q1", "HCM"),
        )
        .with_contact("0901234567", "a@b.vn")
        .with_shipping_fee(30_000.0);

        let outcome = client.checkout(&draft).await.unwrap();
        assert_eq!(outcome.payment_url, "https://pay.example/31");

        let sent = mock.requests();
        assert_eq!(sent[0].path, "/api/orders/createOrder");
        assert_eq!(sent[0].body.as_ref().unwrap()["totalAmount"], 530_000.0);
        assert_eq!(sent[1].query_value("orderId"), Some("31"));
        assert_eq!(sent[1].query_value("amount"), Some("530000"));
    }
}
