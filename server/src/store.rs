//! One JSON file per resource, keyed by the numeric id the store assigns.
//!
//! References are kept as bare keys (`{"personaId": 3}`) and expanded into the
//! referenced record when read back.

use crate::error::ServerError;
use serde_json::{Map, Value};
use shared::ResourceKind;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Mutex;

/// Reference fields of a resource and the resource each one points to.
fn references(kind: ResourceKind) -> &'static [(&'static str, ResourceKind)] {
    match kind {
        ResourceKind::Persons => &[],
        ResourceKind::Courses | ResourceKind::Activities => &[("responsable", ResourceKind::Persons)],
        ResourceKind::Participations => &[
            ("persona", ResourceKind::Persons),
            ("curso", ResourceKind::Courses),
            ("actividad", ResourceKind::Activities),
        ],
    }
}

pub struct Tables {
    stores: HashMap<ResourceKind, jfs::Store>,
    /// Serializes id assignment and every other write.
    writes: Mutex<()>,
}

impl Tables {
    pub fn open(dir: &Path) -> io::Result<Tables> {
        fs::create_dir_all(dir)?;
        let mut stores = HashMap::new();
        for kind in ResourceKind::ALL {
            let mut cfg = jfs::Config::default();
            cfg.single = true;
            cfg.pretty = true;
            stores.insert(kind, jfs::Store::new_with_cfg(dir.join(kind.path()), cfg)?);
        }
        Ok(Tables {
            stores,
            writes: Mutex::new(()),
        })
    }

    fn store(&self, kind: ResourceKind) -> Result<&jfs::Store, ServerError> {
        self.stores
            .get(&kind)
            .ok_or_else(|| ServerError::UnknownResource(kind.path().to_string()))
    }

    /// All records in id order, references expanded.
    pub fn list(&self, kind: ResourceKind) -> Result<Vec<Value>, ServerError> {
        let mut rows: Vec<(i64, Value)> = self
            .store(kind)?
            .all::<Value>()?
            .into_iter()
            .map(|(id, record)| (id.parse().unwrap_or(i64::MAX), record))
            .collect();
        rows.sort_by_key(|(id, _)| *id);
        Ok(rows
            .into_iter()
            .map(|(_, record)| self.expand(kind, record))
            .collect())
    }

    pub fn get(&self, kind: ResourceKind, id: &str) -> Result<Value, ServerError> {
        let record = self.raw(kind, id)?;
        Ok(self.expand(kind, record))
    }

    /// Stores a new record under the next free id and returns it expanded.
    pub fn insert(&self, kind: ResourceKind, record: Value) -> Result<Value, ServerError> {
        let mut record = normalize(kind, record)?;
        let _guard = self.writes.lock().map_err(|_| ServerError::Poisoned)?;

        let store = self.store(kind)?;
        let next = store
            .all::<Value>()?
            .keys()
            .filter_map(|id| id.parse::<i64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        record.insert(kind.key().to_string(), Value::from(next));
        let record = Value::Object(record);
        store.save_with_id(&record, &next.to_string())?;
        tracing::info!(resource = kind.path(), id = next, "created");
        Ok(self.expand(kind, record))
    }

    /// Overwrites an existing record; the stored id wins over any id in the body.
    pub fn replace(&self, kind: ResourceKind, id: &str, record: Value) -> Result<Value, ServerError> {
        let mut record = normalize(kind, record)?;
        let _guard = self.writes.lock().map_err(|_| ServerError::Poisoned)?;

        let existing = self.raw(kind, id)?;
        let stored_id = existing.get(kind.key()).cloned().unwrap_or(Value::Null);
        record.insert(kind.key().to_string(), stored_id);
        let record = Value::Object(record);
        self.store(kind)?.save_with_id(&record, id)?;
        tracing::info!(resource = kind.path(), id, "updated");
        Ok(self.expand(kind, record))
    }

    pub fn remove(&self, kind: ResourceKind, id: &str) -> Result<(), ServerError> {
        let _guard = self.writes.lock().map_err(|_| ServerError::Poisoned)?;
        self.raw(kind, id)?;
        self.store(kind)?.delete(id)?;
        tracing::info!(resource = kind.path(), id, "deleted");
        Ok(())
    }

    fn raw(&self, kind: ResourceKind, id: &str) -> Result<Value, ServerError> {
        match self.store(kind)?.get::<Value>(id) {
            Ok(record) => Ok(record),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(ServerError::NotFound {
                resource: kind.path(),
                id: id.to_string(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    /// Replaces each bare reference with the record it names. A dangling key
    /// is left as it is.
    fn expand(&self, kind: ResourceKind, mut record: Value) -> Value {
        for &(field, target) in references(kind) {
            let id = match record.get(field).and_then(|link| link.get(target.key())) {
                Some(id) => id_text(id),
                None => continue,
            };
            if let Ok(referenced) = self.raw(target, &id) {
                record[field] = self.expand(target, referenced);
            }
        }
        record
    }
}

/// Checks the body is an object, reduces references to bare keys and applies
/// the participation rule: one person and exactly one of course or activity.
fn normalize(kind: ResourceKind, record: Value) -> Result<Map<String, Value>, ServerError> {
    let mut record = match record {
        Value::Object(map) => map,
        _ => return Err(ServerError::Invalid("el cuerpo debe ser un objeto JSON".to_string())),
    };

    for &(field, target) in references(kind) {
        let key = match record.get(field) {
            None | Some(Value::Null) => continue,
            Some(link) => link.get(target.key()).cloned(),
        };
        match key {
            Some(id) if !id.is_null() => {
                let mut bare = Map::new();
                bare.insert(target.key().to_string(), id);
                record.insert(field.to_string(), Value::Object(bare));
            }
            _ => {
                return Err(ServerError::Invalid(format!(
                    "{} debe incluir {}",
                    field,
                    target.key()
                )))
            }
        }
    }

    if kind == ResourceKind::Participations {
        let present = |field: &str| record.get(field).map_or(false, |value| !value.is_null());
        if !present("persona") {
            return Err(ServerError::Invalid("la participación requiere una persona".to_string()));
        }
        if present("curso") == present("actividad") {
            return Err(ServerError::Invalid(
                "la participación debe referir a un curso o a una actividad".to_string(),
            ));
        }
    }

    Ok(record)
}

fn id_text(id: &Value) -> String {
    match id {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
