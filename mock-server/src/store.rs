//! In-memory document store.
//!
//! Documents are schemaless JSON objects grouped by collection name, kept in
//! insertion order. The store assigns `_id`, `createdAt` and `updatedAt` the
//! way the real backend does and never lets a patch overwrite them.

use std::collections::HashMap;

use chrono::{SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use uuid::Uuid;

pub type Document = Map<String, Value>;

const ID: &str = "_id";
const CREATED_AT: &str = "createdAt";
const UPDATED_AT: &str = "updatedAt";

#[derive(Debug, Default)]
pub struct Store {
    collections: HashMap<&'static str, Vec<Document>>,
}

impl Store {
    pub fn all(&self, collection: &str) -> Vec<Document> {
        self.collections.get(collection).cloned().unwrap_or_default()
    }

    pub fn get(&self, collection: &str, id: &str) -> Option<Document> {
        self.collections
            .get(collection)?
            .iter()
            .find(|doc| has_id(doc, id))
            .cloned()
    }

    /// Store `doc` with fresh identity and timestamps, returning the stored copy.
    pub fn insert(&mut self, collection: &'static str, mut doc: Document) -> Document {
        let now = timestamp();
        doc.insert(ID.to_string(), Value::String(Uuid::new_v4().simple().to_string()));
        doc.insert(CREATED_AT.to_string(), Value::String(now.clone()));
        doc.insert(UPDATED_AT.to_string(), Value::String(now));
        self.collections.entry(collection).or_default().push(doc.clone());
        doc
    }

    /// Merge `patch` into the document. Identity and timestamps are kept.
    pub fn update(&mut self, collection: &str, id: &str, patch: Document) -> Option<Document> {
        let doc = self.get_mut(collection, id)?;
        for (key, value) in patch {
            if key != ID && key != CREATED_AT && key != UPDATED_AT {
                doc.insert(key, value);
            }
        }
        doc.insert(UPDATED_AT.to_string(), Value::String(timestamp()));
        Some(doc.clone())
    }

    pub fn remove(&mut self, collection: &str, id: &str) -> Option<Document> {
        let docs = self.collections.get_mut(collection)?;
        let index = docs.iter().position(|doc| has_id(doc, id))?;
        Some(docs.remove(index))
    }

    pub fn get_mut(&mut self, collection: &str, id: &str) -> Option<&mut Document> {
        self.collections
            .get_mut(collection)?
            .iter_mut()
            .find(|doc| has_id(doc, id))
    }
}

fn has_id(doc: &Document, id: &str) -> bool {
    doc.get(ID).and_then(Value::as_str) == Some(id)
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Fill in keys missing from `doc`.
pub fn with_defaults(mut doc: Document, defaults: Value) -> Document {
    if let Value::Object(defaults) = defaults {
        for (key, value) in defaults {
            doc.entry(key).or_insert(value);
        }
    }
    doc
}

/// True when `doc[field]` renders as `expected`: strings compare directly,
/// booleans and numbers by their JSON text, arrays by membership.
pub fn field_matches(doc: &Document, field: &str, expected: &str) -> bool {
    match doc.get(field) {
        Some(Value::String(value)) => value == expected,
        Some(Value::Array(items)) => items.iter().any(|item| item.as_str() == Some(expected)),
        Some(Value::Null) | None => false,
        Some(other) => other.to_string() == expected,
    }
}

/// Keep documents matching every `(query param, field)` pair present in
/// `params`.
pub fn filter_by(
    docs: Vec<Document>,
    params: &HashMap<String, String>,
    mapping: &[(&str, &str)],
) -> Vec<Document> {
    docs.into_iter()
        .filter(|doc| {
            mapping.iter().all(|(param, field)| match params.get(*param) {
                Some(expected) => field_matches(doc, field, expected),
                None => true,
            })
        })
        .collect()
}

/// Slice `docs` according to `page`/`limit` and wrap them in the paged
/// envelope. Without a limit every document is returned on page 1.
pub fn paginate(docs: Vec<Document>, params: &HashMap<String, String>) -> Value {
    let total = docs.len();
    let page = params
        .get("page")
        .and_then(|p| p.parse::<usize>().ok())
        .unwrap_or(1)
        .max(1);
    let limit = params
        .get("limit")
        .and_then(|l| l.parse::<usize>().ok())
        .filter(|l| *l > 0);

    let (data, limit, pages): (Vec<Document>, usize, usize) = match limit {
        Some(limit) => (
            docs.into_iter().skip(page.saturating_sub(1).saturating_mul(limit)).take(limit).collect(),
            limit,
            total.div_ceil(limit),
        ),
        None => (docs, total, 1),
    };

    json!({
        "data": data,
        "pagination": { "page": page, "limit": limit, "total": total, "pages": pages },
    })
}
