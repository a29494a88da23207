//! Shopping cart module.
//!
//! Contains the cart shapes and the joined lines shown in the header and
//! cart page.

mod cart;

pub use cart::{Cart, CartItem, CartLine, CartSummary, ProductSummary, MAX_QUANTITY_PER_ITEM};
