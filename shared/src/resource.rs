use crate::id::RecordId;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

/// The four backend-managed entity types. Doubles as the shell's tab
/// selection and as the key of dependency lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Persons,
    Courses,
    Activities,
    Participations,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Persons,
        ResourceKind::Courses,
        ResourceKind::Activities,
        ResourceKind::Participations,
    ];

    /// Path segment below the API base url.
    pub fn path(self) -> &'static str {
        match self {
            ResourceKind::Persons => "personas",
            ResourceKind::Courses => "cursos",
            ResourceKind::Activities => "actividades",
            ResourceKind::Participations => "participaciones",
        }
    }

    pub fn from_path(path: &str) -> Option<ResourceKind> {
        ResourceKind::ALL.into_iter().find(|kind| kind.path() == path)
    }

    /// Identifier field on the wire.
    pub fn key(self) -> &'static str {
        match self {
            ResourceKind::Persons => "personaId",
            ResourceKind::Courses => "cursoId",
            ResourceKind::Activities => "actividadId",
            ResourceKind::Participations => "participacionId",
        }
    }

    /// Tab label.
    pub fn title(self) -> &'static str {
        match self {
            ResourceKind::Persons => "Personas",
            ResourceKind::Courses => "Cursos",
            ResourceKind::Activities => "Actividades",
            ResourceKind::Participations => "Participaciones",
        }
    }
}

impl Default for ResourceKind {
    fn default() -> Self {
        ResourceKind::Persons
    }
}

/// A record type exposed by the backend under `/api/<path>`.
pub trait Resource: Clone + fmt::Debug + Serialize + DeserializeOwned + 'static {
    const KIND: ResourceKind;
    /// Name of the identifier field on the wire, e.g. `personaId`.
    const KEY: &'static str;

    fn id(&self) -> Option<&RecordId>;

    fn path() -> &'static str {
        Self::KIND.path()
    }
}
