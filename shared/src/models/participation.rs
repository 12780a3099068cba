use super::activity::Activity;
use super::course::Course;
use super::person::Person;
use super::text;
use crate::editor::{Editable, Texts};
use crate::form::{choice_text, number_text, parse_number, Choice, FieldSpec, Input};
use crate::id::RecordId;
use crate::lookup::{Dependency, Lookups, NOT_AVAILABLE};
use crate::reference::{ForeignKey, Linked};
use crate::resource::{Resource, ResourceKind};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

pub const MISSING_SELECTION: &str = "Debe seleccionar una persona y un curso o una actividad.";

/// Participation status. Unknown values are kept verbatim so one odd record
/// does not keep the rest of the list from loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Activo,
    Completado,
    Abandono,
    Other(String),
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Activo, Status::Completado, Status::Abandono];

    pub fn as_str(&self) -> &str {
        match self {
            Status::Activo => "ACTIVO",
            Status::Completado => "COMPLETADO",
            Status::Abandono => "ABANDONO",
            Status::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Status::Activo => "Activo",
            Status::Completado => "Completado",
            Status::Abandono => "Abandono",
            Status::Other(raw) => raw,
        }
    }

    /// Status from a selector value; empty means none was chosen.
    pub fn parse(value: &str) -> Option<Status> {
        if value.is_empty() {
            None
        } else {
            Some(Status::from(value.to_string()))
        }
    }
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ACTIVO" => Status::Activo,
            "COMPLETADO" => Status::Completado,
            "ABANDONO" => Status::Abandono,
            _ => Status::Other(value),
        }
    }
}

impl From<Status> for String {
    fn from(status: Status) -> String {
        match status {
            Status::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Participation {
    #[serde(rename = "participacionId", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(rename = "persona", default)]
    pub person: Option<Linked<Person>>,
    #[serde(rename = "curso", default)]
    pub course: Option<Linked<Course>>,
    #[serde(rename = "actividad", default)]
    pub activity: Option<Linked<Activity>>,
    #[serde(rename = "rol", default, deserialize_with = "text")]
    pub role: String,
    #[serde(rename = "estado", default)]
    pub status: Option<Status>,
    #[serde(rename = "calificacion", default)]
    pub score: Option<f64>,
}

impl Participation {
    /// The event this participation belongs to; a course wins if the backend
    /// ever sends both.
    pub fn event(&self) -> Option<EventRef> {
        if let Some(id) = self.course.as_ref().and_then(Linked::id) {
            return Some(EventRef::Course(id.clone()));
        }
        self.activity
            .as_ref()
            .and_then(Linked::id)
            .map(|id| EventRef::Activity(id.clone()))
    }
}

impl Resource for Participation {
    const KIND: ResourceKind = ResourceKind::Participations;
    const KEY: &'static str = "participacionId";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

/// Exactly one event: a course or an activity.
#[derive(Debug, Clone, PartialEq)]
pub enum EventRef {
    Course(RecordId),
    Activity(RecordId),
}

/// Written as the two wire fields `curso` and `actividad`, the unused one null.
impl Serialize for EventRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            EventRef::Course(id) => {
                map.serialize_entry("curso", &ForeignKey::<Course>::new(id.clone()))?;
                map.serialize_entry("actividad", &Option::<()>::None)?;
            }
            EventRef::Activity(id) => {
                map.serialize_entry("curso", &Option::<()>::None)?;
                map.serialize_entry("actividad", &ForeignKey::<Activity>::new(id.clone()))?;
            }
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Course,
    Activity,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Course => "curso",
            EventKind::Activity => "actividad",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EventKind::Course => "Curso",
            EventKind::Activity => "Actividad",
        }
    }

    pub fn parse(value: &str) -> Option<EventKind> {
        match value {
            "curso" => Some(EventKind::Course),
            "actividad" => Some(EventKind::Activity),
            _ => None,
        }
    }
}

/// The event part of the form: which kind is selected and, maybe, which one.
/// Holding a single variant makes "both selected" unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum EventChoice {
    Course(Option<RecordId>),
    Activity(Option<RecordId>),
}

impl EventChoice {
    pub fn kind(&self) -> EventKind {
        match self {
            EventChoice::Course(_) => EventKind::Course,
            EventChoice::Activity(_) => EventKind::Activity,
        }
    }

    pub fn selected(&self) -> Option<EventRef> {
        match self {
            EventChoice::Course(id) => id.clone().map(EventRef::Course),
            EventChoice::Activity(id) => id.clone().map(EventRef::Activity),
        }
    }

    fn empty(kind: EventKind) -> Self {
        match kind {
            EventKind::Course => EventChoice::Course(None),
            EventKind::Activity => EventChoice::Activity(None),
        }
    }
}

impl Default for EventChoice {
    fn default() -> Self {
        EventChoice::Course(None)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipationPayload {
    #[serde(rename = "participacionId", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(rename = "persona")]
    pub person: ForeignKey<Person>,
    #[serde(flatten)]
    pub event: EventRef,
    #[serde(rename = "rol")]
    pub role: String,
    #[serde(rename = "estado")]
    pub status: Option<Status>,
    #[serde(rename = "calificacion")]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticipationDraft {
    pub id: Option<RecordId>,
    pub person: Option<RecordId>,
    pub event: EventChoice,
    pub role: String,
    pub status: String,
    pub score: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipationField {
    Person,
    EventKind,
    Course,
    Activity,
    Role,
    Status,
    Score,
}

fn participant_label(person: &Person) -> String {
    format!("{} ({})", person.full_name(), person.dni)
}

impl Editable for Participation {
    type Draft = ParticipationDraft;
    type Field = ParticipationField;
    type Payload = ParticipationPayload;

    const TEXTS: Texts = Texts {
        heading: "Participaciones registradas",
        add: "+ Registrar Participación",
        new_title: "Nueva Participación",
        edit_title: "Editar Participación",
        create_label: "Guardar Participación",
        update_label: "Actualizar Participación",
        loading: "Cargando participaciones...",
        empty: "No hay participaciones registradas.",
        load_error: "Error al cargar las participaciones. Por favor, asegúrate de que el backend esté funcionando.",
        save_error: "Error al guardar la participación. Verifica los datos.",
        delete_error: "Error al eliminar la participación.",
        confirm_delete: "¿Estás seguro de que quieres eliminar esta participación?",
        created: "Participación registrada con éxito!",
        updated: "Participación actualizada con éxito!",
        deleted: "Participación eliminada con éxito!",
    };
    const COLUMNS: &'static [&'static str] =
        &["Participante", "Tipo Evento", "Evento", "Rol", "Estado", "Calificación"];
    const DEPENDENCIES: &'static [Dependency] =
        &[Dependency::Persons, Dependency::Courses, Dependency::Activities];

    fn to_draft(&self) -> ParticipationDraft {
        let event = match self.event() {
            Some(EventRef::Course(id)) => EventChoice::Course(Some(id)),
            Some(EventRef::Activity(id)) => EventChoice::Activity(Some(id)),
            None => EventChoice::default(),
        };
        ParticipationDraft {
            id: self.id.clone(),
            person: self.person.as_ref().and_then(Linked::id).cloned(),
            event,
            role: self.role.clone(),
            status: self.status.as_ref().map(|s| s.as_str().to_string()).unwrap_or_default(),
            score: number_text(self.score),
        }
    }

    fn draft_id(draft: &ParticipationDraft) -> Option<&RecordId> {
        draft.id.as_ref()
    }

    fn set_field(draft: &mut ParticipationDraft, field: ParticipationField, value: String) {
        match field {
            ParticipationField::Person => draft.person = RecordId::from_choice(&value),
            ParticipationField::EventKind => {
                if let Some(kind) = EventKind::parse(&value) {
                    draft.event = EventChoice::empty(kind);
                }
            }
            ParticipationField::Course => draft.event = EventChoice::Course(RecordId::from_choice(&value)),
            ParticipationField::Activity => {
                draft.event = EventChoice::Activity(RecordId::from_choice(&value))
            }
            ParticipationField::Role => draft.role = value,
            ParticipationField::Status => draft.status = value,
            ParticipationField::Score => draft.score = value,
        }
    }

    fn payload(draft: &ParticipationDraft) -> Result<ParticipationPayload, &'static str> {
        let person = draft.person.clone().ok_or(MISSING_SELECTION)?;
        let event = draft.event.selected().ok_or(MISSING_SELECTION)?;
        Ok(ParticipationPayload {
            id: draft.id.clone(),
            person: ForeignKey::new(person),
            event,
            role: draft.role.clone(),
            status: Status::parse(&draft.status),
            score: parse_number(&draft.score),
        })
    }

    fn form(draft: &ParticipationDraft, lookups: &Lookups) -> Vec<FieldSpec<ParticipationField>> {
        let kinds = [EventKind::Course, EventKind::Activity]
            .iter()
            .map(|kind| Choice::new(kind.as_str(), kind.label()))
            .collect();
        let selected_event = match &draft.event {
            EventChoice::Course(id) | EventChoice::Activity(id) => choice_text(id.as_ref()),
        };
        let event_field = match draft.event.kind() {
            EventKind::Course => FieldSpec::new(
                ParticipationField::Course,
                "Curso",
                Input::Select {
                    empty: Some("Seleccionar Curso"),
                    choices: lookups.course_choices(),
                },
                selected_event,
            ),
            EventKind::Activity => FieldSpec::new(
                ParticipationField::Activity,
                "Actividad",
                Input::Select {
                    empty: Some("Seleccionar Actividad"),
                    choices: lookups.activity_choices(),
                },
                selected_event,
            ),
        };
        let statuses = Status::ALL
            .iter()
            .map(|s| Choice::new(s.as_str(), s.label()))
            .collect();

        vec![
            FieldSpec::new(
                ParticipationField::Person,
                "Seleccionar Alumno/Participante",
                Input::Select {
                    empty: Some("Seleccionar Alumno/Participante"),
                    choices: lookups.person_choices(participant_label),
                },
                choice_text(draft.person.as_ref()),
            ),
            FieldSpec::new(
                ParticipationField::Role,
                "Rol (Ej: ALUMNO, ENCARGADO, PARTICIPANTE)",
                Input::Text,
                &draft.role,
            ),
            FieldSpec::new(
                ParticipationField::EventKind,
                "Tipo de Evento",
                Input::Select {
                    empty: None,
                    choices: kinds,
                },
                draft.event.kind().as_str(),
            ),
            event_field,
            FieldSpec::new(
                ParticipationField::Status,
                "Estado",
                Input::Select {
                    empty: Some("Seleccionar Estado"),
                    choices: statuses,
                },
                &draft.status,
            ),
            FieldSpec::new(
                ParticipationField::Score,
                "Calificación (Opcional)",
                Input::Number {
                    min: Some(0),
                    max: Some(10),
                },
                &draft.score,
            )
            .optional(),
        ]
    }

    fn cells(&self, lookups: &Lookups) -> Vec<String> {
        let (kind, name) = match self.event() {
            Some(EventRef::Course(_)) => (
                EventKind::Course.label(),
                lookups.course_name(self.course.as_ref()),
            ),
            Some(EventRef::Activity(_)) => (
                EventKind::Activity.label(),
                lookups.activity_name(self.activity.as_ref()),
            ),
            None => (NOT_AVAILABLE, None),
        };
        vec![
            lookups.person_name(self.person.as_ref()),
            kind.to_string(),
            name.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            self.role.clone(),
            self.status.as_ref().map(|s| s.as_str().to_string()).unwrap_or_default(),
            self.score
                .map(|score| score.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ]
    }
}
