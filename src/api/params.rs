use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
};
use serde_json::Value;
use url::form_urlencoded;

use crate::error::ApiError;

/// Largest request body read for parameters
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Generic request-parameter map: query string merged with the body.
///
/// Body values override query values with the same name. Form-encoded and
/// JSON object bodies are read; any other body is ignored.
#[derive(Debug, Default, Clone)]
pub struct RequestParams {
    values: HashMap<String, Value>,
}

/// An integer parameter after coercion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntParam {
    pub value: i64,
    /// False when the raw value was not a plain in-range integer and had to be
    /// coerced (e.g. "42abc", "abc", 4.5, true).
    pub exact: bool,
}

impl RequestParams {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Integer view of `key`. `None` when absent or null.
    pub fn int_param(&self, key: &str) -> Option<IntParam> {
        match self.values.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(IntParam {
                value: coerce_int(s),
                exact: s.trim().parse::<i64>().is_ok(),
            }),
            Value::Number(n) => Some(match n.as_i64() {
                Some(value) => IntParam { value, exact: true },
                None => IntParam {
                    // Float-to-int `as` saturates and maps NaN to 0
                    value: n.as_f64().map(|f| f as i64).unwrap_or(i64::MAX),
                    exact: false,
                },
            }),
            Value::Bool(b) => Some(IntParam {
                value: i64::from(*b),
                exact: false,
            }),
            Value::Array(_) | Value::Object(_) => Some(IntParam {
                value: 0,
                exact: false,
            }),
        }
    }

    fn extend_form(&mut self, input: &[u8]) {
        for (key, value) in form_urlencoded::parse(input) {
            self.values
                .insert(key.into_owned(), Value::String(value.into_owned()));
        }
    }
}

/// Integer cast with the legacy semantics: skip leading whitespace, then read
/// the longest leading numeric string (`[+-]digits[.digits][e[+-]digits]`).
/// A plain integer prefix saturates on overflow; a prefix with a fraction or
/// exponent is read as a float and truncated toward zero, so "1e3" is 1000
/// and "4.7" is 4. No numeric prefix gives 0.
pub fn coerce_int(raw: &str) -> i64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let sign_len = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut end = digits_from(sign_len);
    let int_digits = end - sign_len;
    let mut is_float = false;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if int_digits > 0 || frac_end > end + 1 {
            end = frac_end;
            is_float = true;
        }
    }
    if int_digits == 0 && !is_float {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp_sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + exp_sign);
        if exp_end > end + 1 + exp_sign {
            end = exp_end;
            is_float = true;
        }
    }

    let numeric = &s[..end];
    if is_float {
        // Float-to-int `as` saturates
        return numeric.parse::<f64>().map(|f| f as i64).unwrap_or(0);
    }

    let negative = bytes.first() == Some(&b'-');
    numeric[sign_len..].bytes().fold(0i64, |value, b| {
        let d = i64::from(b - b'0');
        if negative {
            value.saturating_mul(10).saturating_sub(d)
        } else {
            value.saturating_mul(10).saturating_add(d)
        }
    })
}

enum BodyKind {
    Form,
    Json,
    Other,
}

fn body_kind(headers: &HeaderMap) -> BodyKind {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();
    let mime = content_type.split(';').next().unwrap_or("").trim();

    if mime == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else if mime == "application/json" || mime.ends_with("+json") {
        BodyKind::Json
    } else {
        BodyKind::Other
    }
}

#[async_trait]
impl<S> FromRequest<S> for RequestParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let mut params = RequestParams::default();

        if let Some(query) = parts.uri.query() {
            params.extend_form(query.as_bytes());
        }

        let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES).await.map_err(|e| {
            tracing::warn!("Failed to read request body: {}", e);
            ApiError::bad_request("Request body could not be read")
        })?;

        if bytes.is_empty() {
            return Ok(params);
        }

        match body_kind(&parts.headers) {
            BodyKind::Form => params.extend_form(&bytes),
            BodyKind::Json => match serde_json::from_slice::<Value>(&bytes) {
                Ok(Value::Object(map)) => params.values.extend(map),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("Invalid JSON request body: {}", e);
                    return Err(ApiError::bad_request("Request body is not valid JSON"));
                }
            },
            BodyKind::Other => {}
        }

        Ok(params)
    }
}
