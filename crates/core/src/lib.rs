//! SimpleBrand Core - Shared types library.
//!
//! This crate provides the types and view logic shared by the storefront:
//! catalog products, prices, the basket, the single-select toggle used by
//! option pickers, and the request state used by data-driven views.
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP, no
//! templates. This keeps it lightweight and easy to test.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, and catalog products
//! - [`selection`] - Single-select toggle state machine
//! - [`fetch`] - Pending / ready / failed request state
//! - [`basket`] - Basket entries and membership

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod basket;
pub mod fetch;
pub mod selection;
pub mod types;

pub use basket::{Basket, BasketChange, BasketEntry};
pub use fetch::Fetch;
pub use selection::{SelectOption, Selection, SingleSelect};
pub use types::*;
