//! `nadzor-products` — inspectable products with manufacturer, origin and a
//! server-assigned serial number.

pub mod product;

pub use product::{Country, Product, ProductDraft};
