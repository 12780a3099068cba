use super::text;
use crate::editor::{Editable, Texts};
use crate::form::{optional_text, FieldSpec, Input};
use crate::id::RecordId;
use crate::lookup::{Lookups, NOT_AVAILABLE};
use crate::resource::{Resource, ResourceKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "personaId", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(rename = "nombre", default, deserialize_with = "text")]
    pub first_name: String,
    #[serde(rename = "apellido", default, deserialize_with = "text")]
    pub last_name: String,
    #[serde(default, deserialize_with = "text")]
    pub dni: String,
    #[serde(default, deserialize_with = "text")]
    pub email: String,
    /// Free-form role tag such as ALUMNO or INSTRUCTOR.
    #[serde(rename = "tipoPersona", default, deserialize_with = "text")]
    pub kind: String,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Resource for Person {
    const KIND: ResourceKind = ResourceKind::Persons;
    const KEY: &'static str = "personaId";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonDraft {
    pub id: Option<RecordId>,
    pub first_name: String,
    pub last_name: String,
    pub dni: String,
    pub email: String,
    pub kind: String,
    pub phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonField {
    FirstName,
    LastName,
    Dni,
    Email,
    Kind,
    Phone,
}

impl Editable for Person {
    type Draft = PersonDraft;
    type Field = PersonField;
    type Payload = Person;

    const TEXTS: Texts = Texts {
        heading: "Listado de Personas",
        add: "+ Agregar Persona",
        new_title: "Nueva Persona",
        edit_title: "Editar Persona",
        create_label: "Guardar Persona",
        update_label: "Actualizar Persona",
        loading: "Cargando personas...",
        empty: "No hay personas registradas.",
        load_error: "Error al cargar las personas. Por favor, asegúrate de que el backend esté funcionando y la URL sea correcta.",
        save_error: "Error al guardar la persona. Verifica los datos y el formato (ej. DNI, Email, Tipo de Persona).",
        delete_error: "Error al eliminar la persona.",
        confirm_delete: "¿Estás seguro de que quieres eliminar esta persona?",
        created: "Persona creada con éxito!",
        updated: "Persona actualizada con éxito!",
        deleted: "Persona eliminada con éxito!",
    };
    const COLUMNS: &'static [&'static str] = &["Nombre Completo", "DNI", "Email", "Tipo", "Teléfono"];

    fn to_draft(&self) -> PersonDraft {
        PersonDraft {
            id: self.id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            dni: self.dni.clone(),
            email: self.email.clone(),
            kind: self.kind.clone(),
            phone: self.phone.clone().unwrap_or_default(),
        }
    }

    fn draft_id(draft: &PersonDraft) -> Option<&RecordId> {
        draft.id.as_ref()
    }

    fn set_field(draft: &mut PersonDraft, field: PersonField, value: String) {
        match field {
            PersonField::FirstName => draft.first_name = value,
            PersonField::LastName => draft.last_name = value,
            PersonField::Dni => draft.dni = value,
            PersonField::Email => draft.email = value,
            PersonField::Kind => draft.kind = value,
            PersonField::Phone => draft.phone = value,
        }
    }

    fn payload(draft: &PersonDraft) -> Result<Person, &'static str> {
        Ok(Person {
            id: draft.id.clone(),
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            dni: draft.dni.clone(),
            email: draft.email.clone(),
            kind: draft.kind.clone(),
            phone: optional_text(&draft.phone),
        })
    }

    fn form(draft: &PersonDraft, _: &Lookups) -> Vec<FieldSpec<PersonField>> {
        vec![
            FieldSpec::new(PersonField::FirstName, "Nombre", Input::Text, &draft.first_name),
            FieldSpec::new(PersonField::LastName, "Apellido", Input::Text, &draft.last_name),
            FieldSpec::new(PersonField::Dni, "DNI", Input::Text, &draft.dni),
            FieldSpec::new(PersonField::Email, "Email", Input::Email, &draft.email),
            FieldSpec::new(PersonField::Kind, "Tipo (ej: ALUMNO, INSTRUCTOR)", Input::Text, &draft.kind),
            FieldSpec::new(PersonField::Phone, "Teléfono (opcional)", Input::Text, &draft.phone).optional(),
        ]
    }

    fn cells(&self, _: &Lookups) -> Vec<String> {
        vec![
            self.full_name(),
            self.dni.clone(),
            self.email.clone(),
            self.kind.clone(),
            self.phone
                .clone()
                .filter(|phone| !phone.is_empty())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ]
    }
}
