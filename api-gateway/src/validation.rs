//! Request validation for order payloads
//!
//! Payload fields arrive as raw JSON values so that a wrong type is reported
//! like any other violated rule instead of rejecting the whole body. Every
//! violation is collected; messages follow the `"field" <problem>` convention
//! clients already parse.

use std::str::FromStr;

use common::decimal::{precision, Price};
use common::model::{NewOrder, OrderItem, OrderStatus};
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

/// A product line as documented for clients
#[derive(Debug, Clone, ToSchema)]
pub struct OrderItemPayload {
    /// Product ID
    pub product: Uuid,
    /// Number of units, at least 1
    pub quantity: u32,
}

/// Order payload accepted by create and edit
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    /// Owning user ID
    #[schema(value_type = Option<String>)]
    pub user: Option<Value>,
    /// Ordered products, at least one
    #[schema(value_type = Option<Vec<OrderItemPayload>>)]
    pub products: Option<Value>,
    /// Voucher IDs, may be empty
    #[schema(value_type = Option<Vec<String>>)]
    pub vouchers: Option<Value>,
    /// Payment method label
    #[schema(value_type = Option<String>)]
    pub payment_method: Option<Value>,
    /// Order status; required on edit, ignored on create
    #[schema(value_type = Option<OrderStatus>)]
    pub status: Option<Value>,
    /// Delivery address
    #[schema(value_type = Option<String>)]
    pub shipping_address: Option<Value>,
    /// Total price, not negative
    #[schema(value_type = Option<f64>)]
    pub total_price: Option<Value>,
}

fn required(field: &str) -> String {
    format!("\"{}\" is required", field)
}

fn must_be(field: &str, what: &str) -> String {
    format!("\"{}\" must be {}", field, what)
}

fn empty(field: &str) -> String {
    format!("\"{}\" is not allowed to be empty", field)
}

/// `null` counts as absent
fn present(raw: Option<&Value>) -> Option<&Value> {
    raw.filter(|value| !value.is_null())
}

fn string<'a>(field: &str, raw: &'a Value, errors: &mut Vec<String>) -> Option<&'a str> {
    match raw {
        Value::String(s) => Some(s.as_str()),
        _ => {
            errors.push(must_be(field, "a string"));
            None
        }
    }
}

/// Numbers and numeric strings are both accepted
fn number(field: &str, raw: &Value, errors: &mut Vec<String>) -> Option<Price> {
    let parsed = match raw {
        Value::Number(n) => decimal(&n.to_string()),
        Value::String(s) => decimal(s.trim()),
        _ => None,
    };
    if parsed.is_none() {
        errors.push(must_be(field, "a number"));
    }
    parsed
}

fn decimal(raw: &str) -> Option<Price> {
    Price::from_str(raw)
        .or_else(|_| Price::from_scientific(raw))
        .ok()
}

/// Parse a GUID, recording a violation when it is malformed
fn guid(field: &str, raw: &str, errors: &mut Vec<String>) -> Option<Uuid> {
    if raw.trim().is_empty() {
        errors.push(empty(field));
        return None;
    }
    match Uuid::parse_str(raw.trim()) {
        Ok(id) => Some(id),
        Err(_) => {
            errors.push(must_be(field, "a valid GUID"));
            None
        }
    }
}

fn required_guid(field: &str, raw: Option<&Value>, errors: &mut Vec<String>) -> Option<Uuid> {
    match present(raw) {
        Some(raw) => string(field, raw, errors).and_then(|s| guid(field, s, errors)),
        None => {
            errors.push(required(field));
            None
        }
    }
}

fn text(field: &str, raw: &Value, errors: &mut Vec<String>) -> Option<String> {
    let s = string(field, raw, errors)?;
    if s.trim().is_empty() {
        errors.push(empty(field));
        return None;
    }
    Some(s.trim().to_string())
}

fn required_text(field: &str, raw: Option<&Value>, errors: &mut Vec<String>) -> Option<String> {
    match present(raw) {
        Some(raw) => text(field, raw, errors),
        None => {
            errors.push(required(field));
            None
        }
    }
}

fn quantity(field: &str, raw: Option<&Value>, errors: &mut Vec<String>) -> Option<u32> {
    let Some(raw) = present(raw) else {
        errors.push(required(field));
        return None;
    };
    let q = number(field, raw, errors)?;

    if !q.fract().is_zero() {
        errors.push(must_be(field, "an integer"));
        return None;
    }
    if q < Price::ONE {
        errors.push(must_be(field, "greater than or equal to 1"));
        return None;
    }
    match q.to_u32() {
        Some(q) => Some(q),
        None => {
            errors.push(must_be(field, &format!("less than or equal to {}", u32::MAX)));
            None
        }
    }
}

fn products(raw: Option<&Value>, errors: &mut Vec<String>) -> Option<Vec<OrderItem>> {
    let Some(raw) = present(raw) else {
        errors.push(required("products"));
        return None;
    };
    let Value::Array(raw) = raw else {
        errors.push(must_be("products", "an array"));
        return None;
    };
    if raw.is_empty() {
        errors.push(must_be("products", "contain at least 1 items"));
        return None;
    }

    let before = errors.len();
    let mut items = Vec::with_capacity(raw.len());
    for (i, item) in raw.iter().enumerate() {
        let field = format!("products[{}]", i);
        let Value::Object(item) = item else {
            errors.push(must_be(&field, "of type object"));
            continue;
        };

        let product = required_guid(&format!("{}.product", field), item.get("product"), errors);
        let quantity = quantity(&format!("{}.quantity", field), item.get("quantity"), errors);

        if let (Some(product), Some(quantity)) = (product, quantity) {
            items.push(OrderItem { product, quantity });
        }
    }

    (errors.len() == before).then_some(items)
}

fn vouchers(raw: Option<&Value>, errors: &mut Vec<String>) -> Option<Vec<Uuid>> {
    let Some(raw) = present(raw) else {
        errors.push(required("vouchers"));
        return None;
    };
    let Value::Array(raw) = raw else {
        errors.push(must_be("vouchers", "an array"));
        return None;
    };

    let before = errors.len();
    let ids: Vec<Uuid> = raw
        .iter()
        .enumerate()
        .filter_map(|(i, id)| {
            let field = format!("vouchers[{}]", i);
            string(&field, id, errors).and_then(|s| guid(&field, s, errors))
        })
        .collect();

    (errors.len() == before).then_some(ids)
}

fn status(raw: Option<&Value>, is_required: bool, errors: &mut Vec<String>) -> Option<OrderStatus> {
    let Some(raw) = present(raw) else {
        if is_required {
            errors.push(required("status"));
        }
        return None;
    };

    match raw.as_str().map(str::parse::<OrderStatus>) {
        Some(Ok(status)) => Some(status),
        _ => {
            let allowed: Vec<&str> = OrderStatus::ALL.iter().map(OrderStatus::as_str).collect();
            errors.push(must_be("status", &format!("one of [{}]", allowed.join(", "))));
            None
        }
    }
}

fn total_price(raw: Option<&Value>, errors: &mut Vec<String>) -> Option<Price> {
    let price = number("totalPrice", present(raw)?, errors)?;
    if price.is_sign_negative() && !price.is_zero() {
        errors.push(must_be("totalPrice", "greater than or equal to 0"));
        return None;
    }
    Some(precision::round_price(price))
}

/// Validated payload: the order to create plus the requested status, if any
struct Checked {
    order: Option<NewOrder>,
    status: Option<OrderStatus>,
    errors: Vec<String>,
}

fn check(payload: &OrderPayload, status_required: bool) -> Checked {
    let mut errors = Vec::new();

    let user = required_guid("user", payload.user.as_ref(), &mut errors);
    let products = products(payload.products.as_ref(), &mut errors);
    let vouchers = vouchers(payload.vouchers.as_ref(), &mut errors);
    let payment_method = required_text("paymentMethod", payload.payment_method.as_ref(), &mut errors);
    let status = status(payload.status.as_ref(), status_required, &mut errors);
    let shipping_address = present(payload.shipping_address.as_ref())
        .and_then(|raw| text("shippingAddress", raw, &mut errors));
    let total_price = total_price(payload.total_price.as_ref(), &mut errors);

    let order = match (user, products, vouchers, payment_method) {
        (Some(user), Some(products), Some(vouchers), Some(payment_method)) if errors.is_empty() => {
            Some(NewOrder {
                user,
                products,
                vouchers,
                payment_method,
                shipping_address,
                total_price,
            })
        }
        _ => None,
    };

    Checked { order, status, errors }
}

/// Validate a create payload, collecting every violation.
///
/// A `status` in the payload is checked but the created order's status is
/// always derived from the payment method.
pub fn validate_order(payload: &OrderPayload) -> Result<NewOrder, Vec<String>> {
    let checked = check(payload, false);
    match checked.order {
        Some(order) => Ok(order),
        None => Err(checked.errors),
    }
}

/// Validate an edit payload against the full order schema and return the new status
pub fn validate_order_update(payload: &OrderPayload) -> Result<OrderStatus, Vec<String>> {
    let checked = check(payload, true);
    match (checked.errors.is_empty(), checked.status) {
        (true, Some(status)) => Ok(status),
        _ => Err(checked.errors),
    }
}

/// Parse an ID taken from the request path
pub fn parse_path_id(field: &str, raw: &str) -> Result<Uuid, Vec<String>> {
    Uuid::parse_str(raw).map_err(|_| vec![must_be(field, "a valid GUID")])
}
