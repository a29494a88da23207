//! Product catalog module.
//!
//! Contains the backend's product, category and attribute shapes.

mod category;
mod media;
mod product;

pub use category::{build_category_tree, ProductCategory};
pub use media::resolve_image_url;
pub use product::{
    AttributeRecord, PageResponse, Product, ProductAccessory, ProductAttribute, ProductStatus,
};
