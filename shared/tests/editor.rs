//! List-editor behaviour against the in-memory backend.

use serde_json::json;
use shared::client::Method;
use shared::models::activity::ActivityField;
use shared::models::course::CourseField;
use shared::models::participation::{EventChoice, ParticipationField, MISSING_SELECTION};
use shared::models::person::PersonField;
use shared::{Activity, Course, Editable, Editor, Participation, Person, Phase, RecordId, ResourceKind};

mod common;
use common::{confirm_delete, mount, submit, FakeBackend};

fn seed_people(backend: &FakeBackend) {
    backend.seed(
        ResourceKind::Persons,
        vec![
            json!({"personaId": 1, "nombre": "Luis", "apellido": "Paz", "dni": "111",
                   "email": "l@x.com", "tipoPersona": "INSTRUCTOR", "telefono": null}),
            json!({"personaId": 2, "nombre": "Eva", "apellido": "Rey", "dni": "222",
                   "email": "e@x.com", "tipoPersona": "ALUMNO", "telefono": "555"}),
        ],
    );
}

fn fill_person(editor: &mut Editor<Person>) {
    editor.set_field(PersonField::FirstName, "Ana".to_string());
    editor.set_field(PersonField::LastName, "Gomez".to_string());
    editor.set_field(PersonField::Dni, "123".to_string());
    editor.set_field(PersonField::Email, "a@x.com".to_string());
    editor.set_field(PersonField::Kind, "ALUMNO".to_string());
}

#[tokio::test]
async fn mount_loads_collection_and_becomes_ready() {
    let backend = FakeBackend::new();
    seed_people(&backend);

    let editor = Editor::<Person>::new();
    assert_eq!(editor.phase(), Phase::Loading);

    let editor = mount::<Person>(&backend).await;
    assert_eq!(editor.phase(), Phase::Ready);
    assert_eq!(editor.records().len(), 2);
    assert_eq!(editor.error(), None);
    assert_eq!(editor.rows()[1].1, vec!["Eva Rey", "222", "e@x.com", "ALUMNO", "555"]);
}

#[tokio::test]
async fn failed_load_is_ready_empty_and_reported() {
    let backend = FakeBackend::new();
    seed_people(&backend);
    backend.fail(Method::Get, "personas", 500, "Internal Server Error", "");

    let editor = mount::<Person>(&backend).await;
    assert_eq!(editor.phase(), Phase::Ready);
    assert!(editor.records().is_empty());
    assert_eq!(editor.error(), Some(Person::TEXTS.load_error));
}

#[tokio::test]
async fn creating_a_person_appends_the_server_copy() {
    let backend = FakeBackend::new();
    backend.seed(
        ResourceKind::Persons,
        vec![json!({"personaId": 6, "nombre": "Luis", "apellido": "Paz", "dni": "111",
                    "email": "l@x.com", "tipoPersona": "INSTRUCTOR"})],
    );
    let mut editor = mount::<Person>(&backend).await;

    editor.toggle_form();
    assert!(editor.is_form_open());
    assert!(!editor.is_editing());
    fill_person(&mut editor);

    let ack = submit(&mut editor, &backend).await;
    assert_eq!(ack, Some(Person::TEXTS.created));

    let request = backend.last_request();
    assert_eq!(request.method, Method::Post);
    assert_eq!(
        request.body.unwrap(),
        json!({"nombre": "Ana", "apellido": "Gomez", "dni": "123", "email": "a@x.com",
               "tipoPersona": "ALUMNO", "telefono": null})
    );

    assert_eq!(editor.records().len(), 2);
    let added = editor.records().as_slice().last().unwrap();
    assert_eq!(added.id, Some(RecordId::from(7)));
    assert_eq!(added.first_name, "Ana");
    assert!(!editor.is_form_open());
    assert_eq!(editor.error(), None);
}

#[tokio::test]
async fn updating_replaces_in_place() {
    let backend = FakeBackend::new();
    seed_people(&backend);
    let mut editor = mount::<Person>(&backend).await;

    assert!(editor.edit(&RecordId::from(1)));
    assert!(editor.is_editing());
    assert_eq!(editor.draft().unwrap().first_name, "Luis");
    editor.set_field(PersonField::FirstName, "Luisa".to_string());

    let ack = submit(&mut editor, &backend).await;
    assert_eq!(ack, Some(Person::TEXTS.updated));
    assert_eq!(backend.last_request().method, Method::Put);

    let names: Vec<&str> = editor.records().iter().map(|p| p.first_name.as_str()).collect();
    assert_eq!(names, vec!["Luisa", "Eva"]);

    let fetched = backend.client::<Person>().get_by_id(&RecordId::from(1)).await.unwrap();
    assert_eq!(fetched.first_name, "Luisa");
}

#[tokio::test]
async fn failed_save_keeps_the_form_for_correction() {
    let backend = FakeBackend::new();
    backend.fail(Method::Post, "personas", 400, "Bad Request", "email inválido");
    let mut editor = mount::<Person>(&backend).await;

    editor.open_blank();
    fill_person(&mut editor);
    let draft_before = editor.draft().cloned();

    assert_eq!(submit(&mut editor, &backend).await, None);
    assert_eq!(editor.error(), Some(Person::TEXTS.save_error));
    assert!(editor.is_form_open());
    assert_eq!(editor.draft().cloned(), draft_before);
    assert!(editor.records().is_empty());
}

#[tokio::test]
async fn delete_needs_confirmation_and_removes_one() {
    let backend = FakeBackend::new();
    seed_people(&backend);
    let mut editor = mount::<Person>(&backend).await;
    let requests_after_mount = backend.request_count();

    let prompt = editor.request_delete(RecordId::from(2));
    assert_eq!(prompt, Person::TEXTS.confirm_delete);
    assert_eq!(editor.pending_delete(), Some(&RecordId::from(2)));
    editor.cancel_delete();
    assert_eq!(editor.pending_delete(), None);
    assert_eq!(confirm_delete(&mut editor, &backend).await, None);
    assert_eq!(backend.request_count(), requests_after_mount);
    assert_eq!(editor.records().len(), 2);

    editor.request_delete(RecordId::from(2));
    assert_eq!(confirm_delete(&mut editor, &backend).await, Some(Person::TEXTS.deleted));
    assert_eq!(backend.last_request().method, Method::Delete);
    let ids: Vec<_> = editor.records().iter().filter_map(|p| p.id.clone()).collect();
    assert_eq!(ids, vec![RecordId::from(1)]);
}

#[tokio::test]
async fn failed_delete_leaves_collection_alone() {
    let backend = FakeBackend::new();
    seed_people(&backend);
    backend.fail(Method::Delete, "personas/1", 409, "Conflict", "tiene participaciones");
    let mut editor = mount::<Person>(&backend).await;

    editor.request_delete(RecordId::from(1));
    assert_eq!(confirm_delete(&mut editor, &backend).await, None);
    assert_eq!(editor.error(), Some(Person::TEXTS.delete_error));
    assert_eq!(editor.records().len(), 2);
}

#[tokio::test]
async fn toggling_an_open_form_discards_the_draft() {
    let backend = FakeBackend::new();
    seed_people(&backend);
    let mut editor = mount::<Person>(&backend).await;

    editor.edit(&RecordId::from(2));
    editor.toggle_form();
    assert!(!editor.is_form_open());
    editor.toggle_form();
    assert_eq!(editor.draft().cloned(), Some(Default::default()));
}

#[tokio::test]
async fn course_payload_sends_integer_duration_and_bare_key() {
    let backend = FakeBackend::new();
    seed_people(&backend);
    let mut editor = mount::<Course>(&backend).await;
    assert_eq!(editor.lookups().persons.len(), 2);

    editor.open_blank();
    editor.set_field(CourseField::Name, "Rust".to_string());
    editor.set_field(CourseField::Description, "Intro".to_string());
    editor.set_field(CourseField::Duration, "10".to_string());
    editor.set_field(CourseField::Modality, "PRESENCIAL".to_string());
    editor.set_field(CourseField::Responsible, "7".to_string());

    assert_eq!(submit(&mut editor, &backend).await, Some(Course::TEXTS.created));
    let body = backend.last_request().body.unwrap();
    assert_eq!(body["duracion"], json!(10));
    assert_eq!(body["responsable"], json!({"personaId": "7"}));
    assert_eq!(body["modalidad"], json!("PRESENCIAL"));
}

#[tokio::test]
async fn dependency_failure_does_not_block_the_module() {
    let backend = FakeBackend::new();
    backend.fail(Method::Get, "personas", 503, "Service Unavailable", "");

    let editor = mount::<Course>(&backend).await;
    assert_eq!(editor.phase(), Phase::Ready);
    assert_eq!(editor.error(), None);
    assert!(editor.lookups().persons.is_empty());
}

#[tokio::test]
async fn editing_an_activity_reduces_timestamp_to_date() {
    let backend = FakeBackend::new();
    seed_people(&backend);
    backend.seed(
        ResourceKind::Activities,
        vec![json!({"actividadId": 3, "nombre": "Charla", "descripcion": "Seguridad",
                    "tipo": "Charla", "fecha": "2024-05-01T00:00:00Z",
                    "responsable": {"personaId": 1, "nombre": "Luis", "apellido": "Paz",
                                    "dni": "111", "email": "l@x.com", "tipoPersona": "INSTRUCTOR"}})],
    );
    let mut editor = mount::<Activity>(&backend).await;

    assert!(editor.edit(&RecordId::from(3)));
    let draft = editor.draft().unwrap();
    assert_eq!(draft.date, "2024-05-01");
    assert_eq!(draft.responsible, Some(RecordId::from(1)));

    editor.set_field(ActivityField::Kind, "Taller".to_string());
    assert_eq!(submit(&mut editor, &backend).await, Some(Activity::TEXTS.updated));
    let body = backend.last_request().body.unwrap();
    assert_eq!(body["fecha"], json!("2024-05-01"));
    assert_eq!(body["responsable"], json!({"personaId": 1}));
    assert_eq!(editor.records().len(), 1);
}

#[tokio::test]
async fn participation_needs_person_and_event_before_any_request() {
    let backend = FakeBackend::new();
    seed_people(&backend);
    let mut editor = mount::<Participation>(&backend).await;
    let requests_after_mount = backend.request_count();

    editor.open_blank();
    editor.set_field(ParticipationField::Role, "ALUMNO".to_string());
    editor.set_field(ParticipationField::Status, "ACTIVO".to_string());
    editor.set_field(ParticipationField::Course, "5".to_string());

    assert!(editor.submit().is_none());
    assert_eq!(editor.error(), Some(MISSING_SELECTION));

    editor.set_field(ParticipationField::Person, "1".to_string());
    editor.set_field(ParticipationField::EventKind, "actividad".to_string());
    assert!(editor.submit().is_none());
    assert_eq!(backend.request_count(), requests_after_mount);
    assert!(editor.is_form_open());
}

#[tokio::test]
async fn choosing_one_event_clears_the_other() {
    let backend = FakeBackend::new();
    let mut editor = mount::<Participation>(&backend).await;
    editor.open_blank();

    editor.set_field(ParticipationField::Course, "5".to_string());
    assert_eq!(editor.draft().unwrap().event, EventChoice::Course(Some(RecordId::from("5"))));

    editor.set_field(ParticipationField::Activity, "9".to_string());
    assert_eq!(editor.draft().unwrap().event, EventChoice::Activity(Some(RecordId::from("9"))));

    editor.set_field(ParticipationField::EventKind, "curso".to_string());
    assert_eq!(editor.draft().unwrap().event, EventChoice::Course(None));
}

#[tokio::test]
async fn participation_round_trip_with_lookups() {
    let backend = FakeBackend::new();
    seed_people(&backend);
    backend.seed(
        ResourceKind::Courses,
        vec![json!({"cursoId": 5, "nombre": "Rust", "descripcion": "Intro", "duracion": 10,
                    "modalidad": "VIRTUAL", "responsable": {"personaId": 1}})],
    );
    let mut editor = mount::<Participation>(&backend).await;
    assert_eq!(editor.lookups().courses.len(), 1);

    editor.open_blank();
    editor.set_field(ParticipationField::Person, "2".to_string());
    editor.set_field(ParticipationField::Course, "5".to_string());
    editor.set_field(ParticipationField::Role, "ALUMNO".to_string());
    editor.set_field(ParticipationField::Status, "COMPLETADO".to_string());
    editor.set_field(ParticipationField::Score, "9".to_string());

    assert_eq!(submit(&mut editor, &backend).await, Some(Participation::TEXTS.created));
    let body = backend.last_request().body.unwrap();
    assert_eq!(body["curso"], json!({"cursoId": "5"}));
    assert_eq!(body["actividad"], json!(null));
    assert_eq!(body["calificacion"], json!(9.0));

    let rows = editor.rows();
    let row = &rows[0].1;
    assert_eq!(row[0], "Eva Rey");
    assert_eq!(row[1], "Curso");
    assert_eq!(row[2], "Rust");
    assert_eq!(row[5], "9");
}

#[tokio::test]
async fn resaving_an_unchanged_participation_keeps_numeric_keys() {
    let backend = FakeBackend::new();
    seed_people(&backend);
    backend.seed(
        ResourceKind::Participations,
        vec![json!({"participacionId": 8, "persona": {"personaId": 2}, "curso": {"cursoId": 5},
                    "actividad": null, "rol": "ALUMNO", "estado": "ACTIVO", "calificacion": null})],
    );
    let mut editor = mount::<Participation>(&backend).await;

    assert!(editor.edit(&RecordId::from(8)));
    assert_eq!(submit(&mut editor, &backend).await, Some(Participation::TEXTS.updated));
    let body = backend.last_request().body.unwrap();
    assert_eq!(body["participacionId"], json!(8));
    assert_eq!(body["persona"], json!({"personaId": 2}));
    assert_eq!(body["curso"], json!({"cursoId": 5}));
}

#[tokio::test]
async fn one_unknown_modality_does_not_blank_the_list() {
    let backend = FakeBackend::new();
    backend.seed(
        ResourceKind::Courses,
        vec![
            json!({"cursoId": 1, "nombre": "Rust", "modalidad": "VIRTUAL"}),
            json!({"cursoId": 2, "nombre": "Go", "modalidad": "MIXTO"}),
        ],
    );
    let editor = mount::<Course>(&backend).await;

    assert_eq!(editor.error(), None);
    assert_eq!(editor.records().len(), 2);
    assert_eq!(editor.rows()[1].1[3], "MIXTO");
}
