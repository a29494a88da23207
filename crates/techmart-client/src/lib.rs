//! REST client for the TechMart storefront backend.
//!
//! An [`ApiClient`] holds the base URL, the default headers and an optional
//! bearer token, and sends through a [`Transport`]. Each backend resource
//! gets a borrowed service (`client.products()`, `client.orders()`, ...),
//! and the fetches that span several endpoints (cart view, variant family,
//! ordered-products report, checkout) live on the client itself.
//!
//! # Example
//!
//! ```rust,ignore
//! use techmart_client::ApiClient;
//! use techmart_catalog::prelude::*;
//!
//! let client = ApiClient::new("http://localhost:8080/api");
//!
//! let groups = client
//!     .category_groups(CategoryId::new(21), &ProductFilters::new(), &Facet::standard())
//!     .await?;
//!
//! if let Some(id) = groups.first().and_then(|g| g.representative_id) {
//!     let family = client.product_and_variants(id).await?;
//!     println!("{} variants", family.variants.len());
//! }
//! ```

mod client;
mod compose;
mod error;
mod request;
mod response;
mod transport;

pub mod services;

pub use client::ApiClient;
pub use compose::{CartView, CheckoutError, CheckoutOutcome};
pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use services::{PaymentRef, PaymentStatusResponse, ProductQuery};
pub use transport::{MockTransport, RecordedRequest, ReqwestTransport, Transport};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        ApiClient, CartView, CheckoutError, CheckoutOutcome, FetchError, Method, PaymentRef,
        ProductQuery,
    };
}
