//! Domain types and listing logic for the TechMart storefront.
//!
//! - **Catalog**: products, attributes, the category tree, image URLs
//! - **Search**: filters, facets, and the variant grouping engine
//! - **Cart**: cart items joined to products
//! - **Checkout**: checkout drafts, shipping addresses, orders
//!
//! Everything here is synchronous and owns no shared state; fetching lives
//! in `techmart-client`.
//!
//! # Example
//!
//! ```rust
//! use techmart_catalog::prelude::*;
//!
//! let products = vec![
//!     Product::new("Laptop X - 8GB").with_id(1).with_group("A").with_price(100.0).with_stock(5),
//!     Product::new("Laptop X - 16GB").with_id(2).with_group("A").with_price(80.0).with_stock(3),
//! ];
//!
//! let groups = group_products(&products, &ProductFilters::new(), &Facet::standard());
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].min_price, 80.0);
//! assert_eq!(groups[0].total_stock, 8);
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod time;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod review;
pub mod search;

pub use error::CatalogError;
pub use ids::*;
pub use money::Vnd;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::*;
    pub use crate::money::{format_range, Vnd};

    // Catalog
    pub use crate::catalog::{
        build_category_tree, resolve_image_url, AttributeRecord, PageResponse, Product,
        ProductAccessory, ProductAttribute, ProductCategory, ProductStatus,
    };

    // Search
    pub use crate::search::{
        extract_facet_options, group_products, CompareList, Facet, FacetOptions, HomeSearch,
        ProductFilters, ProductGroup, SearchHandoff, SortOption, VariantFamily,
    };

    // Cart
    pub use crate::cart::{Cart, CartItem, CartLine, CartSummary};

    // Checkout
    pub use crate::checkout::{
        CheckoutDraft, CheckoutItem, CreateOrderRequest, Order, OrderItem, OrderStats,
        OrderStatus, OrderedProduct, ShippingAddress,
    };

    pub use crate::review::{average_rating, ProductReview};
}
