//! Checkout module.
//!
//! Contains checkout drafts, the shipping-address encoding, and orders.

mod address;
mod flow;
mod order;

pub use address::{ShippingAddress, MIN_STREET_LEN, NOTE_LABEL};
pub use flow::{CheckoutDraft, CheckoutItem};
pub use order::{
    status_name, CategoryName, CreateOrderRequest, Order, OrderItem, OrderItemProduct,
    OrderLineRequest, OrderResponse, OrderStats, OrderStatus, OrderedProduct,
    StatusHistoryEntry,
};
