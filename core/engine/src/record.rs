//! FILENAME: core/engine/src/record.rs
//! PURPOSE: Field-name access into an opaque dataset item.
//! CONTEXT: The grid pipeline never assumes a record shape. Column accessors
//! either call a derivation function or look a field up by name through the
//! `Record` trait defined here.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::cell::CellValue;

/// One item of the input dataset, addressable by field name.
pub trait Record {
    /// Returns the value stored under `name`, or `None` if the record has no
    /// such field.
    fn field(&self, name: &str) -> Option<CellValue>;
}

impl<S: BuildHasher> Record for HashMap<String, CellValue, S> {
    fn field(&self, name: &str) -> Option<CellValue> {
        self.get(name).cloned()
    }
}

impl Record for BTreeMap<String, CellValue> {
    fn field(&self, name: &str) -> Option<CellValue> {
        self.get(name).cloned()
    }
}

impl Record for serde_json::Map<String, serde_json::Value> {
    fn field(&self, name: &str) -> Option<CellValue> {
        self.get(name).map(CellValue::from)
    }
}

/// Only JSON objects have fields; any other JSON value has none.
impl Record for serde_json::Value {
    fn field(&self, name: &str) -> Option<CellValue> {
        match self {
            serde_json::Value::Object(map) => map.field(name),
            _ => None,
        }
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Option<CellValue> {
        (**self).field(name)
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn field(&self, name: &str) -> Option<CellValue> {
        (**self).field(name)
    }
}

impl<R: Record + ?Sized> Record for std::sync::Arc<R> {
    fn field(&self, name: &str) -> Option<CellValue> {
        (**self).field(name)
    }
}
