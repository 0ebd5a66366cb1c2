//! Business logic services.
//!
//! # Services
//!
//! - `cart` - Read a client's cart, add products to it
//! - `orders` - Place orders from carts, read them back
//!
//! Services own no connections. They are built from an `Arc<dyn Store>`
//! and share it between their components.

pub mod cart;
pub mod orders;

pub use cart::{CartError, CartService, CartView, ProductResponse};
pub use orders::{OrderError, OrderService};
