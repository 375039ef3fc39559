//! Tolerant decoding of submission bodies.
//!
//! A body may arrive as an already structured record, as JSON text or as
//! form-urlencoded text. Decoders are tried in a fixed order and the first
//! success wins; if none applies the body degrades to an empty record.

use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

pub type FieldMap = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundBody {
    Record(FieldMap),
    Text(String),
    Empty,
}

impl InboundBody {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return InboundBody::Empty;
        }
        InboundBody::Text(String::from_utf8_lossy(bytes).into_owned())
    }
}

impl From<FieldMap> for InboundBody {
    fn from(fields: FieldMap) -> Self {
        InboundBody::Record(fields)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("body is not a structured record")]
    NotARecord,

    #[error("body is not text")]
    NotText,

    #[error("invalid JSON object: {0}")]
    Json(String),

    #[error("no key=value pairs in body")]
    NoPairs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySource {
    Record,
    Json,
    Form,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedBody {
    pub fields: FieldMap,
    pub source: BodySource,
}

type Decoder = fn(&InboundBody) -> Result<FieldMap, DecodeError>;

const DECODERS: [(BodySource, Decoder); 3] = [
    (BodySource::Record, decode_record),
    (BodySource::Json, decode_json_text),
    (BodySource::Form, decode_form_text),
];

pub fn decode_record(body: &InboundBody) -> Result<FieldMap, DecodeError> {
    match body {
        InboundBody::Record(fields) => Ok(fields.clone()),
        _ => Err(DecodeError::NotARecord),
    }
}

pub fn decode_json_text(body: &InboundBody) -> Result<FieldMap, DecodeError> {
    let InboundBody::Text(text) = body else {
        return Err(DecodeError::NotText);
    };

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map
            .into_iter()
            .map(|(key, value)| (key, stringify(value)))
            .collect()),
        Ok(_) => Err(DecodeError::Json("top-level value is not an object".to_string())),
        Err(e) => Err(DecodeError::Json(e.to_string())),
    }
}

/// Later occurrences of a repeated key overwrite earlier ones.
pub fn decode_form_text(body: &InboundBody) -> Result<FieldMap, DecodeError> {
    let InboundBody::Text(text) = body else {
        return Err(DecodeError::NotText);
    };

    let fields: FieldMap = url::form_urlencoded::parse(text.trim().as_bytes())
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if !text.contains('=') || fields.is_empty() {
        return Err(DecodeError::NoPairs);
    }

    Ok(fields)
}

pub fn normalize_body(body: &InboundBody) -> NormalizedBody {
    for (source, decode) in DECODERS {
        match decode(body) {
            Ok(fields) => return NormalizedBody { fields, source },
            Err(e) => tracing::trace!(?source, error = %e, "decoder did not apply"),
        }
    }

    if !matches!(body, InboundBody::Empty) {
        tracing::warn!("submission body could not be decoded, continuing with an empty record");
    }

    NormalizedBody {
        fields: FieldMap::new(),
        source: BodySource::Default,
    }
}

fn stringify(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}
