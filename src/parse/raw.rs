//! Wire-level structures for catalog documents.
//!
//! These mirror the JSON keys exactly and stay permissive: every block field
//! is optional here, and the convention-specific requirements are enforced
//! when the raw document is converted (see [`super::IntoCatalog`]).

use crate::document::{Connection, FuzzyScores};
use crate::error::{DecodeError, SchemaError, ValidationError};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub const KEY_NAME: &str = "nome_do_gpt";
pub const KEY_CATEGORY: &str = "categoria";
pub const KEY_MAIN_FUNCTION: &str = "função_principal";
pub const KEY_BLOCKS: &str = "blocos_funcionais";
/// Spelling used by the export format; accepted on input as well.
pub const KEY_BLOCKS_EXPORT: &str = "blocos";
pub const KEY_CONNECTIONS: &str = "conexoes";

/// A block exactly as found in the source document.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBlock {
    pub id: Option<String>,
    pub nome: Option<String>,
    pub tipo: Option<String>,
    pub descricao: Option<String>,
    pub texto: Option<String>,
    pub fuzzy: Option<FuzzyScores>,
    #[serde(rename = "S(x)")]
    pub membership: Option<f64>,
    #[serde(skip)]
    pub source: Option<Map<String, Value>>,
}

/// A document whose top-level keys are present and well-typed.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub name: String,
    pub category: String,
    pub main_function: Option<String>,
    pub blocks: Vec<RawBlock>,
    pub connections: Vec<Connection>,
}

impl RawDocument {
    /// Decodes raw bytes into a `RawDocument`.
    ///
    /// Fails with a `DecodeError` when the bytes are not a UTF-8 JSON object and
    /// with a `SchemaError` when a required top-level key is absent or mistyped.
    pub fn from_bytes(raw: &[u8]) -> Result<Self, ValidationError> {
        let text = std::str::from_utf8(raw).map_err(|e| DecodeError::InvalidUtf8 {
            valid_up_to: e.valid_up_to(),
        })?;
        Self::from_json_str(text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ValidationError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let value: Value =
            serde_json::from_str(text).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;
        match value {
            Value::Object(map) => Ok(Self::from_map(map)?),
            other => Err(DecodeError::NotAnObject {
                found: json_kind(&other),
            }
            .into()),
        }
    }

    fn from_map(mut map: Map<String, Value>) -> Result<Self, SchemaError> {
        let blocks_key = if map.contains_key(KEY_BLOCKS) {
            KEY_BLOCKS
        } else {
            KEY_BLOCKS_EXPORT
        };

        // Presence is checked for every key before any value is inspected.
        for (key, reported) in [
            (KEY_NAME, KEY_NAME),
            (KEY_CATEGORY, KEY_CATEGORY),
            (blocks_key, KEY_BLOCKS),
            (KEY_CONNECTIONS, KEY_CONNECTIONS),
        ] {
            if !map.contains_key(key) {
                return Err(SchemaError::MissingKey { key: reported });
            }
        }

        let name: String = take_field(&mut map, KEY_NAME)?;
        let category: String = take_field(&mut map, KEY_CATEGORY)?;
        let main_function: Option<String> = match map.remove(KEY_MAIN_FUNCTION) {
            Some(value) => from_field(value, KEY_MAIN_FUNCTION.to_string())?,
            None => None,
        };

        let block_values: Vec<Value> = take_field(&mut map, blocks_key)?;
        let blocks = block_values
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                let source = value.as_object().cloned();
                let mut block: RawBlock = from_field(value, format!("{}[{}]", blocks_key, i))?;
                block.source = source;
                Ok(block)
            })
            .collect::<Result<Vec<RawBlock>, SchemaError>>()?;

        let connection_values: Vec<Value> = take_field(&mut map, KEY_CONNECTIONS)?;
        let connections = connection_values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                serde_json::from_value::<Connection>(value).map_err(|e| {
                    SchemaError::InvalidConnection {
                        index,
                        message: format!("expected [source, target] pair: {}", e),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name,
            category,
            main_function,
            blocks,
            connections,
        })
    }
}

fn take_field<T: DeserializeOwned>(
    map: &mut Map<String, Value>,
    key: &'static str,
) -> Result<T, SchemaError> {
    let value = map
        .remove(key)
        .ok_or(SchemaError::MissingKey { key })?;
    from_field(value, key.to_string())
}

fn from_field<T: DeserializeOwned>(value: Value, key: String) -> Result<T, SchemaError> {
    serde_json::from_value(value).map_err(|e| SchemaError::InvalidField {
        key,
        message: e.to_string(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
