use super::person::Person;
use super::text;
use crate::editor::{Editable, Texts};
use crate::form::{choice_text, parse_int, Choice, FieldSpec, Input};
use crate::id::RecordId;
use crate::lookup::{Dependency, Lookups};
use crate::reference::{ForeignKey, Linked};
use crate::resource::{Resource, ResourceKind};
use serde::{Deserialize, Serialize};

/// Course modality. Values outside the known set are kept verbatim so one odd
/// record does not keep the rest of the list from loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Modality {
    Presencial,
    Virtual,
    Hibrido,
    Other(String),
}

impl Modality {
    pub const ALL: [Modality; 3] = [Modality::Presencial, Modality::Virtual, Modality::Hibrido];

    pub fn as_str(&self) -> &str {
        match self {
            Modality::Presencial => "PRESENCIAL",
            Modality::Virtual => "VIRTUAL",
            Modality::Hibrido => "HIBRIDO",
            Modality::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Modality::Presencial => "Presencial",
            Modality::Virtual => "Virtual",
            Modality::Hibrido => "Híbrido",
            Modality::Other(raw) => raw,
        }
    }

    /// Modality from a selector value; empty means none was chosen.
    pub fn parse(value: &str) -> Option<Modality> {
        if value.is_empty() {
            None
        } else {
            Some(Modality::from(value.to_string()))
        }
    }
}

impl From<String> for Modality {
    fn from(value: String) -> Self {
        match value.as_str() {
            "PRESENCIAL" => Modality::Presencial,
            "VIRTUAL" => Modality::Virtual,
            "HIBRIDO" => Modality::Hibrido,
            _ => Modality::Other(value),
        }
    }
}

impl From<Modality> for String {
    fn from(modality: Modality) -> String {
        match modality {
            Modality::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(rename = "cursoId", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(rename = "nombre", default, deserialize_with = "text")]
    pub name: String,
    #[serde(rename = "descripcion", default, deserialize_with = "text")]
    pub description: String,
    /// Hours.
    #[serde(rename = "duracion", default)]
    pub duration: Option<i64>,
    #[serde(rename = "modalidad", default)]
    pub modality: Option<Modality>,
    #[serde(rename = "responsable", default)]
    pub responsible: Option<Linked<Person>>,
}

impl Resource for Course {
    const KIND: ResourceKind = ResourceKind::Courses;
    const KEY: &'static str = "cursoId";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoursePayload {
    #[serde(rename = "cursoId", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "duracion")]
    pub duration: Option<i64>,
    #[serde(rename = "modalidad")]
    pub modality: Option<Modality>,
    #[serde(rename = "responsable")]
    pub responsible: Option<ForeignKey<Person>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseDraft {
    pub id: Option<RecordId>,
    pub name: String,
    pub description: String,
    pub duration: String,
    pub modality: String,
    /// Selected person, kept in the form the backend sent it.
    pub responsible: Option<RecordId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseField {
    Name,
    Description,
    Duration,
    Modality,
    Responsible,
}

/// Option label for a responsible person: "Nombre Apellido (tipoPersona)".
pub(crate) fn responsible_label(person: &Person) -> String {
    format!("{} ({})", person.full_name(), person.kind)
}

impl Editable for Course {
    type Draft = CourseDraft;
    type Field = CourseField;
    type Payload = CoursePayload;

    const TEXTS: Texts = Texts {
        heading: "Cursos disponibles",
        add: "+ Agregar Curso",
        new_title: "Nuevo Curso",
        edit_title: "Editar Curso",
        create_label: "Guardar Curso",
        update_label: "Actualizar Curso",
        loading: "Cargando cursos...",
        empty: "No hay cursos registrados.",
        load_error: "Error al cargar los cursos. Por favor, asegúrate de que el backend esté funcionando.",
        save_error: "Error al guardar el curso. Verifica los datos y el responsable.",
        delete_error: "Error al eliminar el curso.",
        confirm_delete: "¿Estás seguro de que quieres eliminar este curso?",
        created: "Curso creado con éxito!",
        updated: "Curso actualizado con éxito!",
        deleted: "Curso eliminado con éxito!",
    };
    const COLUMNS: &'static [&'static str] =
        &["Nombre", "Descripción", "Duración (hs)", "Modalidad", "Responsable"];
    const DEPENDENCIES: &'static [Dependency] = &[Dependency::Persons];

    fn to_draft(&self) -> CourseDraft {
        CourseDraft {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            duration: self.duration.map(|hours| hours.to_string()).unwrap_or_default(),
            modality: self.modality.as_ref().map(|m| m.as_str().to_string()).unwrap_or_default(),
            responsible: self.responsible.as_ref().and_then(Linked::id).cloned(),
        }
    }

    fn draft_id(draft: &CourseDraft) -> Option<&RecordId> {
        draft.id.as_ref()
    }

    fn set_field(draft: &mut CourseDraft, field: CourseField, value: String) {
        match field {
            CourseField::Name => draft.name = value,
            CourseField::Description => draft.description = value,
            CourseField::Duration => draft.duration = value,
            CourseField::Modality => draft.modality = value,
            CourseField::Responsible => draft.responsible = RecordId::from_choice(&value),
        }
    }

    fn payload(draft: &CourseDraft) -> Result<CoursePayload, &'static str> {
        Ok(CoursePayload {
            id: draft.id.clone(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            duration: parse_int(&draft.duration),
            modality: Modality::parse(&draft.modality),
            responsible: draft.responsible.clone().map(ForeignKey::new),
        })
    }

    fn form(draft: &CourseDraft, lookups: &Lookups) -> Vec<FieldSpec<CourseField>> {
        let modalities = Modality::ALL
            .iter()
            .map(|m| Choice::new(m.as_str(), m.label()))
            .collect();
        vec![
            FieldSpec::new(CourseField::Name, "Nombre del curso", Input::Text, &draft.name),
            FieldSpec::new(CourseField::Description, "Descripción", Input::Text, &draft.description),
            FieldSpec::new(
                CourseField::Duration,
                "Duración (en horas)",
                Input::Number { min: None, max: None },
                &draft.duration,
            ),
            FieldSpec::new(
                CourseField::Modality,
                "Modalidad",
                Input::Select {
                    empty: Some("Seleccionar Modalidad"),
                    choices: modalities,
                },
                &draft.modality,
            ),
            FieldSpec::new(
                CourseField::Responsible,
                "Responsable",
                Input::Select {
                    empty: Some("Seleccionar Responsable"),
                    choices: lookups.person_choices(responsible_label),
                },
                choice_text(draft.responsible.as_ref()),
            ),
        ]
    }

    fn cells(&self, lookups: &Lookups) -> Vec<String> {
        vec![
            self.name.clone(),
            self.description.clone(),
            self.duration.map(|hours| hours.to_string()).unwrap_or_default(),
            self.modality.as_ref().map(|m| m.as_str().to_string()).unwrap_or_default(),
            lookups.person_name(self.responsible.as_ref()),
        ]
    }
}
