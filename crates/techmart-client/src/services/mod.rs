//! One service per backend resource.
//!
//! Services borrow the [`ApiClient`](crate::ApiClient) and map each endpoint
//! to a typed method. None of them retry or time out; a failed request
//! surfaces to the caller as a [`FetchError`](crate::FetchError).

mod attribute;
mod cart;
mod category;
mod order;
mod payment;
mod product;
mod review;

pub use attribute::AttributeService;
pub use cart::CartService;
pub use category::CategoryService;
pub use order::OrderService;
pub use payment::{PaymentRef, PaymentService, PaymentStatusResponse};
pub use product::{ProductQuery, ProductService};
pub use review::ReviewService;
