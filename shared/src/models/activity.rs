use super::course::responsible_label;
use super::person::Person;
use super::text;
use crate::dates::{self, calendar_date};
use crate::editor::{Editable, Texts};
use crate::form::{choice_text, FieldSpec, Input};
use crate::id::RecordId;
use crate::lookup::{Dependency, Lookups};
use crate::reference::{ForeignKey, Linked};
use crate::resource::{Resource, ResourceKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "actividadId", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(rename = "nombre", default, deserialize_with = "text")]
    pub name: String,
    #[serde(rename = "descripcion", default, deserialize_with = "text")]
    pub description: String,
    /// Free-form, e.g. "Taller" or "Charla".
    #[serde(rename = "tipo", default, deserialize_with = "text")]
    pub kind: String,
    #[serde(rename = "fecha", default, with = "calendar_date")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "responsable", default)]
    pub responsible: Option<Linked<Person>>,
}

impl Resource for Activity {
    const KIND: ResourceKind = ResourceKind::Activities;
    const KEY: &'static str = "actividadId";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityPayload {
    #[serde(rename = "actividadId", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "fecha", with = "calendar_date")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "responsable")]
    pub responsible: Option<ForeignKey<Person>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityDraft {
    pub id: Option<RecordId>,
    pub name: String,
    pub description: String,
    pub kind: String,
    /// `YYYY-MM-DD`, as a date input holds it.
    pub date: String,
    pub responsible: Option<RecordId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityField {
    Name,
    Description,
    Kind,
    Date,
    Responsible,
}

impl Editable for Activity {
    type Draft = ActivityDraft;
    type Field = ActivityField;
    type Payload = ActivityPayload;

    const TEXTS: Texts = Texts {
        heading: "Actividades de capacitación",
        add: "+ Agregar Actividad",
        new_title: "Nueva Actividad",
        edit_title: "Editar Actividad",
        create_label: "Guardar Actividad",
        update_label: "Actualizar Actividad",
        loading: "Cargando actividades...",
        empty: "No hay actividades registradas.",
        load_error: "Error al cargar las actividades. Por favor, asegúrate de que el backend esté funcionando.",
        save_error: "Error al guardar la actividad. Verifica los datos y el responsable.",
        delete_error: "Error al eliminar la actividad.",
        confirm_delete: "¿Estás seguro de que quieres eliminar esta actividad?",
        created: "Actividad creada con éxito!",
        updated: "Actividad actualizada con éxito!",
        deleted: "Actividad eliminada con éxito!",
    };
    const COLUMNS: &'static [&'static str] = &["Nombre", "Descripción", "Tipo", "Fecha", "Responsable"];
    const DEPENDENCIES: &'static [Dependency] = &[Dependency::Persons];

    fn to_draft(&self) -> ActivityDraft {
        ActivityDraft {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            kind: self.kind.clone(),
            date: self.date.as_ref().map(dates::format_date).unwrap_or_default(),
            responsible: self.responsible.as_ref().and_then(Linked::id).cloned(),
        }
    }

    fn draft_id(draft: &ActivityDraft) -> Option<&RecordId> {
        draft.id.as_ref()
    }

    fn set_field(draft: &mut ActivityDraft, field: ActivityField, value: String) {
        match field {
            ActivityField::Name => draft.name = value,
            ActivityField::Description => draft.description = value,
            ActivityField::Kind => draft.kind = value,
            ActivityField::Date => draft.date = value,
            ActivityField::Responsible => draft.responsible = RecordId::from_choice(&value),
        }
    }

    fn payload(draft: &ActivityDraft) -> Result<ActivityPayload, &'static str> {
        Ok(ActivityPayload {
            id: draft.id.clone(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            kind: draft.kind.clone(),
            date: dates::date_only(&draft.date),
            responsible: draft.responsible.clone().map(ForeignKey::new),
        })
    }

    fn form(draft: &ActivityDraft, lookups: &Lookups) -> Vec<FieldSpec<ActivityField>> {
        vec![
            FieldSpec::new(ActivityField::Name, "Nombre de la actividad", Input::Text, &draft.name),
            FieldSpec::new(ActivityField::Description, "Descripción", Input::Text, &draft.description),
            FieldSpec::new(
                ActivityField::Kind,
                "Tipo de actividad (Ej: Taller, Charla)",
                Input::Text,
                &draft.kind,
            ),
            FieldSpec::new(ActivityField::Date, "Fecha", Input::Date, &draft.date),
            FieldSpec::new(
                ActivityField::Responsible,
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
            self.kind.clone(),
            self.date.as_ref().map(dates::format_date).unwrap_or_default(),
            lookups.person_name(self.responsible.as_ref()),
        ]
    }
}
