//! Store registry, URL, and image collaborators.
//!
//! The reference platform resolves all three through ambient global
//! registries. Here each one is an explicit seam injected into the markup
//! stage, with small in-memory implementations for tests and single-store
//! deployments.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{MarkupError, Result};
use crate::order::ProductRef;

/// Opaque reference to a store view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreId(pub u32);

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store registry seam.
pub trait StoreDirectory: Send + Sync {
    /// Customer-facing store name, used for merchant and seller organizations.
    fn frontend_name(&self, store: StoreId) -> Result<String>;

    /// Secure base URL of the store frontend, e.g. `https://shop.example.com`.
    fn secure_base_url(&self, store: StoreId) -> Result<String>;
}

/// Frontend URL construction seam.
pub trait UrlBuilder: Send + Sync {
    /// Absolute secure URL for a frontend route with path parameters.
    fn secure_url(&self, store: StoreId, route: &str, params: &[(&str, String)])
        -> Result<String>;
}

/// Catalog image resizing seam.
pub trait ImageResizer: Send + Sync {
    /// URL of the product's base image resized to `width` pixels.
    fn resize(&self, product: &ProductRef, width: u32) -> Result<String>;
}

#[derive(Debug, Clone)]
struct StoreRecord {
    frontend_name: String,
    secure_base_url: String,
}

/// In-memory store registry.
#[derive(Debug, Default)]
pub struct StaticStores {
    stores: HashMap<StoreId, StoreRecord>,
}

impl StaticStores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a store view with its display name and secure base URL.
    pub fn register(
        &mut self,
        store: StoreId,
        frontend_name: impl Into<String>,
        secure_base_url: impl Into<String>,
    ) {
        self.stores.insert(
            store,
            StoreRecord {
                frontend_name: frontend_name.into(),
                secure_base_url: secure_base_url.into(),
            },
        );
    }

    fn record(&self, store: StoreId) -> Result<&StoreRecord> {
        self.stores
            .get(&store)
            .ok_or(MarkupError::UnknownStore(store))
    }
}

impl StoreDirectory for StaticStores {
    fn frontend_name(&self, store: StoreId) -> Result<String> {
        Ok(self.record(store)?.frontend_name.clone())
    }

    fn secure_base_url(&self, store: StoreId) -> Result<String> {
        Ok(self.record(store)?.secure_base_url.clone())
    }
}

/// Builds frontend URLs in the platform's path-parameter style:
/// `<base>/<route>/<key>/<value>/`.
pub struct StoreUrlBuilder {
    stores: Arc<dyn StoreDirectory>,
}

impl StoreUrlBuilder {
    pub fn new(stores: Arc<dyn StoreDirectory>) -> Self {
        Self { stores }
    }
}

impl UrlBuilder for StoreUrlBuilder {
    fn secure_url(
        &self,
        store: StoreId,
        route: &str,
        params: &[(&str, String)],
    ) -> Result<String> {
        let base = self.stores.secure_base_url(store)?;
        let mut url = base.trim_end_matches('/').to_string();
        url.push('/');
        url.push_str(route.trim_matches('/'));
        for (key, value) in params {
            url.push('/');
            url.push_str(key);
            url.push('/');
            url.push_str(value);
        }
        url.push('/');
        Ok(url)
    }
}

/// Resizer that maps a catalog image path onto the platform's
/// width-segmented resized-media cache.
pub struct CachedImagePathResizer {
    media_base_url: String,
}

impl CachedImagePathResizer {
    pub fn new(media_base_url: impl Into<String>) -> Self {
        Self {
            media_base_url: media_base_url.into(),
        }
    }
}

impl ImageResizer for CachedImagePathResizer {
    fn resize(&self, product: &ProductRef, width: u32) -> Result<String> {
        if product.image.is_empty() {
            return Err(MarkupError::Image(format!(
                "product {} has no base image",
                product.id
            )));
        }
        Ok(format!(
            "{}/cache/{}x/{}",
            self.media_base_url.trim_end_matches('/'),
            width,
            product.image.trim_start_matches('/')
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> StaticStores {
        let mut stores = StaticStores::new();
        stores.register(StoreId(1), "Acme Outdoor", "https://shop.acme.test/");
        stores
    }

    #[test]
    fn test_frontend_name_lookup() {
        let stores = directory();
        assert_eq!(stores.frontend_name(StoreId(1)).unwrap(), "Acme Outdoor");
    }

    #[test]
    fn test_unknown_store_is_an_error() {
        let stores = directory();
        assert!(matches!(
            stores.frontend_name(StoreId(99)),
            Err(MarkupError::UnknownStore(StoreId(99)))
        ));
    }

    #[test]
    fn test_secure_url_uses_path_parameters() {
        let urls = StoreUrlBuilder::new(Arc::new(directory()));
        let url = urls
            .secure_url(
                StoreId(1),
                "sales/order/view",
                &[("order_id", "42".to_string())],
            )
            .unwrap();
        assert_eq!(url, "https://shop.acme.test/sales/order/view/order_id/42/");
    }

    #[test]
    fn test_resize_builds_cache_url() {
        let resizer = CachedImagePathResizer::new("https://shop.acme.test/media");
        let product = ProductRef {
            id: 7,
            url: "https://shop.acme.test/widget.html".to_string(),
            image: "/catalog/product/w/i/widget.jpg".to_string(),
        };
        assert_eq!(
            resizer.resize(&product, 265).unwrap(),
            "https://shop.acme.test/media/cache/265x/catalog/product/w/i/widget.jpg"
        );
    }

    #[test]
    fn test_resize_without_base_image_fails() {
        let resizer = CachedImagePathResizer::new("https://shop.acme.test/media");
        let product = ProductRef {
            id: 7,
            url: String::new(),
            image: String::new(),
        };
        assert!(matches!(
            resizer.resize(&product, 265),
            Err(MarkupError::Image(_))
        ));
    }
}
