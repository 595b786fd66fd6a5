//! Schema.org order markup post-processing.
//!
//! [`SchemaMarkup`] runs after the template engine: it builds an `Order`
//! JSON-LD payload from the render context and splices the `<script>` block
//! in front of the email's closing `</body>` tag. Without an order in the
//! context, or without a `</body>` marker, the HTML passes through
//! untouched.

mod payload;
mod status;

pub use payload::{
    build_offers, build_order_payload, generate_metadata, OfferPayload, OrderPayload,
    OrganizationPayload, ProductPayload, QuantityPayload,
};
pub use status::status_url;

use std::sync::Arc;

use crate::error::Result;
use crate::render::{RenderContext, Renderer};
use crate::store::{ImageResizer, StoreDirectory, UrlBuilder};

/// Literal marker the markup block is spliced in front of.
const BODY_CLOSE: &str = "</body>";

/// The email post-processor.
pub struct SchemaMarkup {
    stores: Arc<dyn StoreDirectory>,
    urls: Arc<dyn UrlBuilder>,
    images: Arc<dyn ImageResizer>,
}

impl SchemaMarkup {
    pub fn new(
        stores: Arc<dyn StoreDirectory>,
        urls: Arc<dyn UrlBuilder>,
        images: Arc<dyn ImageResizer>,
    ) -> Self {
        Self {
            stores,
            urls,
            images,
        }
    }

    /// Renders the template through `renderer`, then injects the markup.
    ///
    /// This is the seam the email sender wires in, mirroring the renderer
    /// override in the host platform. Upstream render errors propagate
    /// unchanged.
    pub fn render_processed(
        &self,
        renderer: &dyn Renderer,
        ctx: &RenderContext,
    ) -> Result<String> {
        let html = renderer.render(ctx)?;
        self.process(&html, ctx)
    }

    /// Post-processes already-rendered HTML.
    ///
    /// Returns the input unchanged when the context has no order or the HTML
    /// has no `</body>` marker. Collaborator and mapping failures during
    /// payload construction are returned as errors; there is no partial
    /// output.
    pub fn process(&self, html: &str, ctx: &RenderContext) -> Result<String> {
        let metadata = generate_metadata(
            ctx,
            self.stores.as_ref(),
            self.urls.as_ref(),
            self.images.as_ref(),
        )?;

        match metadata {
            Some(markup) => Ok(splice_before_body_close(html, &markup)),
            None => {
                tracing::trace!("no order bound in context, leaving email untouched");
                Ok(html.to_string())
            }
        }
    }
}

/// Replaces the first case-insensitive `</body>` occurrence with
/// `<markup></body>`.
///
/// Literal substring matching on purpose: the spliced format is part of the
/// output contract, and an HTML parser would not round-trip the rest of the
/// email byte for byte.
fn splice_before_body_close(html: &str, markup: &str) -> String {
    match find_body_close(html) {
        Some(at) => {
            let mut out = String::with_capacity(html.len() + markup.len());
            out.push_str(&html[..at]);
            out.push_str(markup);
            out.push_str(BODY_CLOSE);
            out.push_str(&html[at + BODY_CLOSE.len()..]);
            out
        }
        None => {
            tracing::debug!("rendered email has no </body> marker, skipping markup injection");
            html.to_string()
        }
    }
}

/// Byte offset of the first case-insensitive `</body>`. ASCII lowercasing
/// preserves byte offsets into the original string.
fn find_body_close(html: &str) -> Option<usize> {
    html.to_ascii_lowercase().find(BODY_CLOSE)
}
