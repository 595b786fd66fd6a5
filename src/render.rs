//! Upstream renderer seam and the per-send variable bag.

use std::collections::HashMap;

use crate::error::Result;
use crate::order::Order;

/// Context key the markup stage inspects.
pub const ORDER_VARIABLE: &str = "order";

/// A template variable bound into the render context.
#[derive(Debug, Clone)]
pub enum ContextValue {
    /// The order an order-confirmation email is rendered for.
    Order(Order),

    /// Any other template variable, passed through to the renderer.
    Value(serde_json::Value),
}

/// The bag of template variables for one email render. Built fresh per send
/// and discarded with it.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    vars: HashMap<String, ContextValue>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(order: Order) -> Self {
        let mut ctx = Self::new();
        ctx.bind_order(order);
        ctx
    }

    pub fn bind(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.vars.insert(name.into(), ContextValue::Value(value));
    }

    pub fn bind_order(&mut self, order: Order) {
        self.vars
            .insert(ORDER_VARIABLE.to_string(), ContextValue::Order(order));
    }

    pub fn get(&self, name: &str) -> Option<&ContextValue> {
        self.vars.get(name)
    }

    /// The order bound under the `order` key, if any.
    pub fn order(&self) -> Option<&Order> {
        match self.vars.get(ORDER_VARIABLE) {
            Some(ContextValue::Order(order)) => Some(order),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.vars.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// The upstream template engine. Implementations render the email body for
/// a context; any failure propagates unchanged through the markup stage.
pub trait Renderer: Send + Sync {
    fn render(&self, ctx: &RenderContext) -> Result<String>;
}

/// Minimal `{{variable}}`-substituting renderer over a stored HTML template.
///
/// Real deployments wire the platform's engine behind [`Renderer`]; this one
/// exists so the processed pipeline can be exercised end to end.
pub struct BasicTemplateRenderer {
    template: String,
}

impl BasicTemplateRenderer {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl Renderer for BasicTemplateRenderer {
    fn render(&self, ctx: &RenderContext) -> Result<String> {
        let mut html = self.template.clone();
        for (name, value) in ctx.iter() {
            let pattern = format!("{{{{{}}}}}", name);
            let replacement = match value {
                ContextValue::Order(order) => order.increment_id.clone(),
                ContextValue::Value(serde_json::Value::String(s)) => s.clone(),
                ContextValue::Value(serde_json::Value::Number(n)) => n.to_string(),
                ContextValue::Value(serde_json::Value::Bool(b)) => b.to_string(),
                ContextValue::Value(serde_json::Value::Null) => String::new(),
                // Arrays and objects render as their JSON representation
                ContextValue::Value(v) => v.to_string(),
            };
            html = html.replace(&pattern, &replacement);
        }
        Ok(html)
    }
}
