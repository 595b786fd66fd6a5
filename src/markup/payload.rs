//! JSON-LD payload types and builders.
//!
//! The payload structs serialize in field declaration order, which fixes the
//! emitted key order without any map type. Field order here is load-bearing
//! for consumers that diff the output.

use serde::Serialize;

use crate::error::Result;
use crate::order::Order;
use crate::render::RenderContext;
use crate::store::{ImageResizer, StoreDirectory, UrlBuilder};

use super::status;

const SCHEMA_CONTEXT: &str = "http://schema.org";

/// Width product images are resized to for inbox previews.
const OFFER_IMAGE_WIDTH: u32 = 265;

/// Frontend route of the customer's order-view page.
const ORDER_VIEW_ROUTE: &str = "sales/order/view";

/// Top-level Schema.org `Order` object.
#[derive(Debug, Serialize)]
pub struct OrderPayload {
    #[serde(rename = "@context")]
    pub context: &'static str,

    #[serde(rename = "@type")]
    pub schema_type: &'static str,

    pub merchant: OrganizationPayload,

    #[serde(rename = "acceptedOffer")]
    pub accepted_offer: Vec<OfferPayload>,

    #[serde(rename = "orderNumber")]
    pub order_number: String,

    #[serde(rename = "priceCurrency")]
    pub price_currency: String,

    pub price: String,

    pub url: String,

    #[serde(rename = "orderStatus")]
    pub order_status: String,

    #[serde(rename = "orderDate")]
    pub order_date: String,
}

/// Schema.org `Organization`, used for both merchant and seller.
#[derive(Debug, Serialize)]
pub struct OrganizationPayload {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,

    pub name: String,
}

impl OrganizationPayload {
    fn named(name: String) -> Self {
        Self {
            schema_type: "Organization",
            name,
        }
    }
}

/// Schema.org `Offer`, one per visible line item.
#[derive(Debug, Serialize)]
pub struct OfferPayload {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,

    #[serde(rename = "itemOffered")]
    pub item_offered: ProductPayload,

    pub price: String,

    #[serde(rename = "priceCurrency")]
    pub price_currency: String,

    #[serde(rename = "eligibleQuantity")]
    pub eligible_quantity: QuantityPayload,

    pub seller: OrganizationPayload,
}

/// Schema.org `Product` inside an offer.
#[derive(Debug, Serialize)]
pub struct ProductPayload {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,

    pub name: String,

    pub sku: String,

    pub url: String,

    pub image: String,
}

/// Schema.org `QuantitativeValue`.
#[derive(Debug, Serialize)]
pub struct QuantityPayload {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,

    pub value: f64,
}

/// Builds the wrapped `<script>` block for the context's order.
///
/// Returns `None` when no order is bound; that send gets no markup.
pub fn generate_metadata(
    ctx: &RenderContext,
    stores: &dyn StoreDirectory,
    urls: &dyn UrlBuilder,
    images: &dyn ImageResizer,
) -> Result<Option<String>> {
    let Some(order) = ctx.order() else {
        return Ok(None);
    };

    let payload = build_order_payload(order, stores, urls, images)?;
    tracing::debug!(
        order = %order.increment_id,
        offers = payload.accepted_offer.len(),
        "built Schema.org order payload"
    );

    let json = serde_json::to_string_pretty(&payload)?;
    Ok(Some(format!(
        "<script type=\"application/ld+json\">\n{}\n</script>",
        json
    )))
}

/// Maps one order onto the Schema.org `Order` payload.
pub fn build_order_payload(
    order: &Order,
    stores: &dyn StoreDirectory,
    urls: &dyn UrlBuilder,
    images: &dyn ImageResizer,
) -> Result<OrderPayload> {
    Ok(OrderPayload {
        context: SCHEMA_CONTEXT,
        schema_type: "Order",
        merchant: OrganizationPayload::named(stores.frontend_name(order.store)?),
        accepted_offer: build_offers(order, stores, images)?,
        order_number: order.increment_id.clone(),
        price_currency: order.currency_code.clone(),
        price: format_amount(order.grand_total),
        url: urls.secure_url(
            order.store,
            ORDER_VIEW_ROUTE,
            &[("order_id", order.entity_id.to_string())],
        )?,
        order_status: status::status_url(&order.state)?,
        order_date: order.store_date(),
    })
}

/// One offer per customer-visible line item, in collection order.
pub fn build_offers(
    order: &Order,
    stores: &dyn StoreDirectory,
    images: &dyn ImageResizer,
) -> Result<Vec<OfferPayload>> {
    let seller_name = stores.frontend_name(order.store)?;

    let mut offers = Vec::new();
    for item in order.visible_items() {
        offers.push(OfferPayload {
            schema_type: "Offer",
            item_offered: ProductPayload {
                schema_type: "Product",
                name: item.name.clone(),
                sku: item.sku.clone(),
                url: item.product.url.clone(),
                image: images.resize(&item.product, OFFER_IMAGE_WIDTH)?,
            },
            price: format_amount(item.price),
            price_currency: order.currency_code.clone(),
            eligible_quantity: QuantityPayload {
                schema_type: "QuantitativeValue",
                value: item.qty_ordered,
            },
            seller: OrganizationPayload::named(seller_name.clone()),
        });
    }
    Ok(offers)
}

/// Two-decimal half-up formatting for money amounts.
///
/// The explicit pre-round matters: `format!("{:.2}")` alone rounds ties to
/// even, which disagrees with the reference output on amounts like `0.125`.
fn format_amount(value: f64) -> String {
    format!("{:.2}", (value * 100.0).round() / 100.0)
}
