use crate::id::RecordId;
use crate::resource::Resource;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::marker::PhantomData;

/// Foreign key as sent to the backend: `{ "<keyField>": id }` and nothing else.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKey<R> {
    id: RecordId,
    marker: PhantomData<fn() -> R>,
}

impl<R: Resource> ForeignKey<R> {
    pub fn new(id: RecordId) -> Self {
        ForeignKey {
            id,
            marker: PhantomData,
        }
    }
}

impl<R: Resource> Serialize for ForeignKey<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(R::KEY, &self.id)?;
        map.end()
    }
}

/// Reference as read from the backend: either just the key or the whole
/// referenced record embedded for display.
#[derive(Debug, Clone, PartialEq)]
pub enum Linked<R> {
    Key(RecordId),
    Expanded(Box<R>),
}

impl<R: Resource> Linked<R> {
    pub fn id(&self) -> Option<&RecordId> {
        match self {
            Linked::Key(id) => Some(id),
            Linked::Expanded(record) => record.id(),
        }
    }

    /// The embedded record, or the matching one among `known` for a bare key.
    pub fn resolve<'a>(&'a self, known: &'a [R]) -> Option<&'a R> {
        match self {
            Linked::Expanded(record) => Some(record),
            Linked::Key(id) => known.iter().find(|r| r.id() == Some(id)),
        }
    }
}

impl<R: Resource> Serialize for Linked<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Linked::Key(id) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(R::KEY, id)?;
                map.end()
            }
            Linked::Expanded(record) => record.serialize(serializer),
        }
    }
}

impl<'de, R: Resource> Deserialize<'de> for Linked<R> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        if map.len() > 1 {
            if let Ok(record) = serde_json::from_value::<R>(Value::Object(map.clone())) {
                return Ok(Linked::Expanded(Box::new(record)));
            }
        }
        match map.remove(R::KEY) {
            Some(Value::Null) | None => Err(de::Error::missing_field(R::KEY)),
            Some(value) => RecordId::deserialize(value)
                .map(Linked::Key)
                .map_err(de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::person::Person;

    #[test]
    fn key_only_reference_stays_a_key() {
        let link: Linked<Person> = serde_json::from_str(r#"{"personaId": 3}"#).unwrap();
        assert_eq!(link, Linked::Key(RecordId::from(3)));
        assert_eq!(serde_json::to_value(&link).unwrap(), serde_json::json!({"personaId": 3}));
    }

    #[test]
    fn embedded_record_is_expanded() {
        let link: Linked<Person> = serde_json::from_str(
            r#"{"personaId": 3, "nombre": "Ana", "apellido": "Gomez", "dni": "123",
                "email": "a@x.com", "tipoPersona": "INSTRUCTOR", "telefono": null}"#,
        )
        .unwrap();
        match &link {
            Linked::Expanded(person) => assert_eq!(person.first_name, "Ana"),
            other => panic!("expected expanded person, got {:?}", other),
        }
        assert_eq!(link.id(), Some(&RecordId::from(3)));
    }

    #[test]
    fn foreign_key_carries_only_the_key() {
        let person = Person {
            id: Some(RecordId::from(9)),
            first_name: "Ana".to_string(),
            ..Person::default()
        };
        let link = Linked::Expanded(Box::new(person));
        let key = ForeignKey::<Person>::new(link.id().cloned().unwrap());
        assert_eq!(serde_json::to_value(&key).unwrap(), serde_json::json!({"personaId": 9}));
    }

    #[test]
    fn bare_key_resolves_through_known_records() {
        let known = vec![Person {
            id: Some(RecordId::from(4)),
            first_name: "Luis".to_string(),
            ..Person::default()
        }];
        let link: Linked<Person> = Linked::Key(RecordId::from("4"));
        assert_eq!(link.resolve(&known).map(|p| p.first_name.as_str()), Some("Luis"));
        assert!(Linked::<Person>::Key(RecordId::from(5)).resolve(&known).is_none());
    }
}
