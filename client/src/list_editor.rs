use crate::api::FetchTransport;
use seed::{self, prelude::*, *};
use shared::form::{FieldSpec, Input};
use shared::{
    fetch_lookup, ApiConfig, ClientError, Dependency, Editable, Editor, LookupData, Phase, RecordId,
    ResourceClient,
};

const CLOSE_FORM: &str = "Cerrar Formulario";
const CANCEL_EDIT: &str = "Cancelar Edición";
const ACTIONS: &str = "Acciones";

pub struct Model<R: Editable> {
    config: ApiConfig,
    editor: Editor<R>,
}

pub enum Msg<R: Editable> {
    Loaded(Result<Vec<R>, ClientError>),
    LookupLoaded(Dependency, Result<LookupData, ClientError>),
    ToggleForm,
    Edit(RecordId),
    CancelEdit,
    FieldChanged(R::Field, String),
    Submit,
    Saved(bool, Result<R, ClientError>),
    Delete(RecordId),
    Deleted(RecordId, Result<bool, ClientError>),
}

fn client<R: Editable>(config: &ApiConfig) -> ResourceClient<R, FetchTransport> {
    ResourceClient::new(config.clone(), FetchTransport)
}

/// Mounts a fresh editor: the primary list and every selector list are
/// requested side by side.
pub fn init<R: Editable>(config: ApiConfig, orders: &mut impl Orders<Msg<R>>) -> Model<R> {
    let primary = client::<R>(&config);
    orders.perform_cmd(async move { Msg::Loaded(primary.list_all().await) });

    for &dependency in R::DEPENDENCIES {
        let config = config.clone();
        orders.perform_cmd(async move {
            Msg::<R>::LookupLoaded(dependency, fetch_lookup(&config, FetchTransport, dependency).await)
        });
    }

    Model {
        config,
        editor: Editor::new(),
    }
}

pub fn update<R: Editable>(msg: Msg<R>, model: &mut Model<R>, orders: &mut impl Orders<Msg<R>>) {
    match msg {
        Msg::Loaded(result) => model.editor.loaded(result),

        Msg::LookupLoaded(dependency, result) => model.editor.lookup_loaded(dependency, result),

        Msg::ToggleForm => model.editor.toggle_form(),

        Msg::Edit(id) => {
            if !model.editor.edit(&id) {
                tracing::warn!(resource = R::path(), id = %id, "record to edit is gone");
            }
        }

        Msg::CancelEdit => model.editor.close_form(),

        Msg::FieldChanged(field, value) => model.editor.set_field(field, value),

        Msg::Submit => {
            if let Some(submission) = model.editor.submit() {
                let client = client::<R>(&model.config);
                orders.perform_cmd(async move {
                    Msg::Saved(submission.is_update(), client.submit(&submission).await)
                });
            }
        }

        Msg::Saved(was_update, result) => {
            if let Some(ack) = model.editor.saved(was_update, result) {
                alert(ack);
            }
        }

        Msg::Delete(id) => {
            let prompt = model.editor.request_delete(id);
            if !confirm(prompt) {
                model.editor.cancel_delete();
                orders.skip();
                return;
            }
            if let Some(id) = model.editor.confirm_delete() {
                let client = client::<R>(&model.config);
                orders.perform_cmd(async move {
                    let result = client.delete(&id).await;
                    Msg::<R>::Deleted(id, result)
                });
            }
        }

        Msg::Deleted(id, result) => {
            if let Some(ack) = model.editor.deleted(&id, result) {
                alert(ack);
            }
        }
    }
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

pub fn view<R: Editable>(model: &Model<R>) -> Node<Msg<R>> {
    let editor = &model.editor;
    let texts = R::TEXTS;
    div![
        attrs! {At::Class => "mt-3"},
        div![
            attrs! {At::Class => "d-flex justify-content-between align-items-center mb-3"},
            h2![texts.heading],
            button![
                attrs! {At::Class => "btn btn-primary", At::Type => "button"},
                ev(Ev::Click, |_| Msg::<R>::ToggleForm),
                if editor.is_form_open() { CLOSE_FORM } else { texts.add }
            ],
        ],
        editor
            .error()
            .map(|error| div![attrs! {At::Class => "alert alert-danger"}, error]),
        IF!(editor.is_form_open() => form_view(editor)),
        match editor.phase() {
            Phase::Loading => p![attrs! {At::Class => "text-muted"}, texts.loading],
            Phase::Ready => table_view(editor),
        },
    ]
}

fn form_view<R: Editable>(editor: &Editor<R>) -> Node<Msg<R>> {
    let texts = R::TEXTS;
    let editing = editor.is_editing();
    form![
        attrs! {At::Class => "card card-body mb-3"},
        ev(Ev::Submit, |event| {
            event.prevent_default();
            Msg::<R>::Submit
        }),
        h4![if editing { texts.edit_title } else { texts.new_title }],
        editor.form().into_iter().map(field_view::<R>),
        div![
            button![
                attrs! {At::Class => "btn btn-success mr-2", At::Type => "submit"},
                if editing { texts.update_label } else { texts.create_label }
            ],
            IF!(editing => button![
                attrs! {At::Class => "btn btn-secondary", At::Type => "button"},
                ev(Ev::Click, |_| Msg::<R>::CancelEdit),
                CANCEL_EDIT
            ]),
        ],
    ]
}

fn field_view<R: Editable>(spec: FieldSpec<R::Field>) -> Node<Msg<R>> {
    let FieldSpec {
        field,
        placeholder,
        input,
        required,
        value,
    } = spec;

    let control = match input {
        Input::Select { empty, choices } => select![
            attrs! {
                At::Class => "form-control",
                At::Required => required.as_at_value(),
            },
            input_ev(Ev::Change, move |selected| Msg::<R>::FieldChanged(field, selected)),
            empty.map(|label| option![attrs! {At::Value => ""}, label]),
            choices.into_iter().map(|choice| {
                let selected = choice.value == value;
                option![
                    attrs! {At::Value => choice.value, At::Selected => selected.as_at_value()},
                    choice.label
                ]
            }),
        ],
        other => {
            let (kind, min, max) = match other {
                Input::Email => ("email", None, None),
                Input::Number { min, max } => ("number", min, max),
                Input::Date => ("date", None, None),
                _ => ("text", None, None),
            };
            input![
                attrs! {
                    At::Type => kind,
                    At::Class => "form-control",
                    At::Placeholder => placeholder,
                    At::Value => value,
                    At::Required => required.as_at_value(),
                    At::Min => min.map_or(AtValue::Ignored, |n| AtValue::Some(n.to_string())),
                    At::Max => max.map_or(AtValue::Ignored, |n| AtValue::Some(n.to_string())),
                },
                input_ev(Ev::Input, move |text| Msg::<R>::FieldChanged(field, text)),
            ]
        }
    };

    div![attrs! {At::Class => "form-group"}, control]
}

fn table_view<R: Editable>(editor: &Editor<R>) -> Node<Msg<R>> {
    let rows = editor.rows();
    table![
        attrs! {At::Class => "table table-striped table-bordered"},
        thead![tr![R::COLUMNS.iter().map(|column| th![*column]), th![ACTIONS]]],
        tbody![if rows.is_empty() {
            vec![tr![td![
                attrs! {At::ColSpan => R::COLUMNS.len() + 1, At::Class => "text-center"},
                R::TEXTS.empty
            ]]]
        } else {
            rows.into_iter()
                .map(|(id, cells)| row_view(id, cells))
                .collect()
        }],
    ]
}

fn row_view<R: Editable>(id: Option<RecordId>, cells: Vec<String>) -> Node<Msg<R>> {
    tr![
        cells.into_iter().map(|cell| td![cell]),
        td![id.map(|id| {
            let edit_id = id.clone();
            nodes![
                button![
                    attrs! {At::Class => "btn btn-sm btn-warning mr-2", At::Type => "button"},
                    ev(Ev::Click, move |_| Msg::<R>::Edit(edit_id)),
                    "Editar"
                ],
                button![
                    attrs! {At::Class => "btn btn-sm btn-danger", At::Type => "button"},
                    ev(Ev::Click, move |_| Msg::<R>::Delete(id)),
                    "Eliminar"
                ],
            ]
        })
        .unwrap_or_default()],
    ]
}
