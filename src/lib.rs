//! Schema.org order markup for transactional emails.
//!
//! This crate post-processes rendered order-confirmation emails: when the
//! render context carries an order, a Schema.org `Order` JSON-LD block is
//! built from the order, its visible line items, and the store registry, and
//! spliced into the HTML immediately before the closing `</body>` tag.
//! Inbox and search consumers read the embedded structured data.
//!
//! The crate does not render templates, persist anything, or send email.
//! The upstream engine sits behind the [`render::Renderer`] trait; store
//! lookups, URL building, and image resizing are injected through the
//! [`store`] collaborator traits.

// Ambient collaborators (store registry, URLs, images)
pub mod store;

// Domain views consumed by the markup stage
pub mod order;

// Upstream renderer seam and per-send variable bag
pub mod render;

// The post-processor itself
pub mod markup;

// Supporting modules
pub mod error;

pub use error::{MarkupError, Result};
pub use markup::SchemaMarkup;
pub use order::{Order, OrderItem, ProductRef};
pub use render::{BasicTemplateRenderer, ContextValue, RenderContext, Renderer};
pub use store::{
    CachedImagePathResizer, ImageResizer, StaticStores, StoreDirectory, StoreId, StoreUrlBuilder,
    UrlBuilder,
};
