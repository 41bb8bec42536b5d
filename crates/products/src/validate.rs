//! Payload validation for write operations.
//!
//! Validation runs on the raw JSON body rather than on a deserialized struct so
//! that every violated field can be reported in one response. Unrecognized
//! fields (including `id`) are ignored; `null` is treated the same as absent.

use serde_json::{Map, Value};

use catalog_core::{DomainError, DomainResult, FieldViolation};

use crate::product::{NewProduct, ProductPatch};

const NAME: &str = "name";
const DESCRIPTION: &str = "description";
const PRICE: &str = "price";
const CATEGORY: &str = "category";
const IN_STOCK: &str = "inStock";

/// Validate a create payload. `name`, `price`, and `category` are required.
pub fn validate_create(payload: &Value) -> DomainResult<NewProduct> {
    let body = as_object(payload)?;
    let mut violations = Violations::default();

    let name = violations.take(non_blank_text(body, NAME, Presence::Required));
    let description = violations.take(text(body, DESCRIPTION));
    let price = violations.take(non_negative_number(body, PRICE, Presence::Required));
    let category = violations.take(non_blank_text(body, CATEGORY, Presence::Required));
    let in_stock = violations.take(boolean(body, IN_STOCK));

    match (name, price, category) {
        (Some(name), Some(price), Some(category)) if violations.is_empty() => Ok(NewProduct {
            name,
            description: description.unwrap_or_default(),
            price,
            category,
            in_stock: in_stock.unwrap_or(false),
        }),
        _ => Err(violations.into_error()),
    }
}

/// Validate an update payload. Only the fields that are present are checked.
pub fn validate_update(payload: &Value) -> DomainResult<ProductPatch> {
    let body = as_object(payload)?;
    let mut violations = Violations::default();

    let patch = ProductPatch {
        name: violations.take(non_blank_text(body, NAME, Presence::Optional)),
        description: violations.take(text(body, DESCRIPTION)),
        price: violations.take(non_negative_number(body, PRICE, Presence::Optional)),
        category: violations.take(non_blank_text(body, CATEGORY, Presence::Optional)),
        in_stock: violations.take(boolean(body, IN_STOCK)),
    };

    if violations.is_empty() {
        Ok(patch)
    } else {
        Err(violations.into_error())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Required,
    Optional,
}

type FieldResult<T> = Result<Option<T>, FieldViolation>;

#[derive(Debug, Default)]
struct Violations(Vec<FieldViolation>);

impl Violations {
    fn take<T>(&mut self, result: FieldResult<T>) -> Option<T> {
        match result {
            Ok(value) => value,
            Err(violation) => {
                self.0.push(violation);
                None
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_error(self) -> DomainError {
        DomainError::validation(self.0)
    }
}

fn as_object(payload: &Value) -> DomainResult<&Map<String, Value>> {
    payload.as_object().ok_or_else(|| {
        DomainError::validation(vec![FieldViolation::new(
            "body",
            "must be a JSON object",
        )])
    })
}

fn field<'a>(
    body: &'a Map<String, Value>,
    name: &'static str,
    presence: Presence,
) -> FieldResult<&'a Value> {
    match body.get(name) {
        None | Some(Value::Null) if presence == Presence::Required => {
            Err(FieldViolation::new(name, "is required"))
        }
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(value)),
    }
}

fn text(body: &Map<String, Value>, name: &'static str) -> FieldResult<String> {
    let Some(value) = field(body, name, Presence::Optional)? else {
        return Ok(None);
    };
    value
        .as_str()
        .map(|s| Some(s.to_string()))
        .ok_or_else(|| FieldViolation::new(name, "must be a string"))
}

fn non_blank_text(
    body: &Map<String, Value>,
    name: &'static str,
    presence: Presence,
) -> FieldResult<String> {
    let Some(value) = field(body, name, presence)? else {
        return Ok(None);
    };
    let s = value
        .as_str()
        .ok_or_else(|| FieldViolation::new(name, "must be a string"))?;
    if s.trim().is_empty() {
        return Err(FieldViolation::new(name, "must not be empty"));
    }
    Ok(Some(s.to_string()))
}

fn non_negative_number(
    body: &Map<String, Value>,
    name: &'static str,
    presence: Presence,
) -> FieldResult<f64> {
    let Some(value) = field(body, name, presence)? else {
        return Ok(None);
    };
    let n = value
        .as_f64()
        .ok_or_else(|| FieldViolation::new(name, "must be a number"))?;
    if n < 0.0 {
        return Err(FieldViolation::new(name, "must not be negative"));
    }
    Ok(Some(n))
}

fn boolean(body: &Map<String, Value>, name: &'static str) -> FieldResult<bool> {
    let Some(value) = field(body, name, Presence::Optional)? else {
        return Ok(None);
    };
    value
        .as_bool()
        .map(Some)
        .ok_or_else(|| FieldViolation::new(name, "must be a boolean"))
}
