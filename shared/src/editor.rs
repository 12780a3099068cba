//! State of one list-editor: the loaded collection, the single create/edit
//! form, the pending delete confirmation and the inline error banner.
//!
//! The editor never talks to the network itself. Each user action returns
//! what should be sent (a [`Submission`], an id to delete) and the outcome is
//! fed back through `loaded`, `saved` and `deleted`, so the same state machine
//! runs under the browser's message loop and in plain async tests.

use crate::client::{ClientError, Submission};
use crate::collection::Collection;
use crate::form::FieldSpec;
use crate::id::RecordId;
use crate::lookup::{Dependency, LookupData, Lookups};
use crate::resource::Resource;
use serde::Serialize;
use std::fmt;

/// User-facing text of one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texts {
    pub heading: &'static str,
    pub add: &'static str,
    pub new_title: &'static str,
    pub edit_title: &'static str,
    pub create_label: &'static str,
    pub update_label: &'static str,
    pub loading: &'static str,
    pub empty: &'static str,
    pub load_error: &'static str,
    pub save_error: &'static str,
    pub delete_error: &'static str,
    pub confirm_delete: &'static str,
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
}

/// Per-resource configuration of the generic editor: draft and payload
/// shapes, form schema, table columns and selector dependencies.
pub trait Editable: Resource {
    /// Form state, kept as the text the controls show.
    type Draft: Clone + Default + fmt::Debug + PartialEq;
    type Field: Copy + fmt::Debug + PartialEq + 'static;
    /// Body of create/update requests. References are foreign keys only.
    type Payload: Serialize + Clone + fmt::Debug;

    const TEXTS: Texts;
    const COLUMNS: &'static [&'static str];
    const DEPENDENCIES: &'static [Dependency] = &[];

    fn to_draft(&self) -> Self::Draft;
    fn draft_id(draft: &Self::Draft) -> Option<&RecordId>;
    fn set_field(draft: &mut Self::Draft, field: Self::Field, value: String);
    /// Builds the request body, or names why the draft cannot be sent.
    fn payload(draft: &Self::Draft) -> Result<Self::Payload, &'static str>;
    fn form(draft: &Self::Draft, lookups: &Lookups) -> Vec<FieldSpec<Self::Field>>;
    fn cells(&self, lookups: &Lookups) -> Vec<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
}

#[derive(Debug, Clone)]
pub struct Editor<R: Editable> {
    phase: Phase,
    records: Collection<R>,
    lookups: Lookups,
    error: Option<String>,
    draft: Option<R::Draft>,
    pending_delete: Option<RecordId>,
}

impl<R: Editable> Editor<R> {
    /// A freshly mounted editor, waiting for its first list.
    pub fn new() -> Self {
        Editor {
            phase: Phase::Loading,
            records: Collection::new(),
            lookups: Lookups::default(),
            error: None,
            draft: None,
            pending_delete: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn records(&self) -> &Collection<R> {
        &self.records
    }

    pub fn lookups(&self) -> &Lookups {
        &self.lookups
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn draft(&self) -> Option<&R::Draft> {
        self.draft.as_ref()
    }

    pub fn is_form_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn is_editing(&self) -> bool {
        self.draft
            .as_ref()
            .map_or(false, |draft| R::draft_id(draft).is_some())
    }

    pub fn pending_delete(&self) -> Option<&RecordId> {
        self.pending_delete.as_ref()
    }

    /// Form schema for the open draft, empty when the form is closed.
    pub fn form(&self) -> Vec<FieldSpec<R::Field>> {
        self.draft
            .as_ref()
            .map(|draft| R::form(draft, &self.lookups))
            .unwrap_or_default()
    }

    pub fn rows(&self) -> Vec<(Option<RecordId>, Vec<String>)> {
        self.records
            .iter()
            .map(|record| (record.id().cloned(), record.cells(&self.lookups)))
            .collect()
    }

    pub fn loaded(&mut self, result: Result<Vec<R>, ClientError>) {
        match result {
            Ok(records) => {
                self.records.replace_all(records);
                self.error = None;
            }
            Err(err) => {
                tracing::error!(resource = R::path(), error = %err, "failed to load records");
                self.records.clear();
                self.error = Some(R::TEXTS.load_error.to_string());
            }
        }
        self.phase = Phase::Ready;
    }

    pub fn lookup_loaded(&mut self, dependency: Dependency, result: Result<LookupData, ClientError>) {
        match result {
            Ok(data) => self.lookups.fill(data),
            Err(err) => tracing::warn!(
                resource = R::path(),
                dependency = dependency.kind().path(),
                error = %err,
                "failed to load selector options"
            ),
        }
    }

    /// The add/close button: opens a blank form, or closes and resets it.
    pub fn toggle_form(&mut self) {
        if self.is_form_open() {
            self.close_form();
        } else {
            self.open_blank();
        }
    }

    pub fn open_blank(&mut self) {
        self.draft = Some(R::Draft::default());
    }

    /// Opens the form on a copy of the record with this id.
    pub fn edit(&mut self, id: &RecordId) -> bool {
        match self.records.get(id) {
            Some(record) => {
                self.draft = Some(record.to_draft());
                true
            }
            None => false,
        }
    }

    pub fn close_form(&mut self) {
        self.draft = None;
    }

    pub fn set_field(&mut self, field: R::Field, value: String) {
        if let Some(draft) = self.draft.as_mut() {
            R::set_field(draft, field, value);
        }
    }

    /// What to send for the open draft. A draft rejected locally sets the
    /// error banner and yields nothing, so no request is made.
    pub fn submit(&mut self) -> Option<Submission<R::Payload>> {
        let draft = self.draft.as_ref()?;
        match R::payload(draft) {
            Ok(payload) => Some(match R::draft_id(draft) {
                Some(id) => Submission::Update(id.clone(), payload),
                None => Submission::Create(payload),
            }),
            Err(reason) => {
                self.error = Some(reason.to_string());
                None
            }
        }
    }

    /// Applies the outcome of a submission. Returns the acknowledgement to
    /// show on success; on failure the form stays open as it was.
    pub fn saved(&mut self, was_update: bool, result: Result<R, ClientError>) -> Option<&'static str> {
        match result {
            Ok(record) => {
                let ack = if was_update {
                    self.records.replace(record);
                    R::TEXTS.updated
                } else {
                    self.records.append(record);
                    R::TEXTS.created
                };
                self.error = None;
                self.draft = None;
                Some(ack)
            }
            Err(err) => {
                tracing::error!(
                    resource = R::path(),
                    error = %err,
                    detail = err.detail().unwrap_or_default(),
                    "failed to save record"
                );
                self.error = Some(R::TEXTS.save_error.to_string());
                None
            }
        }
    }

    /// Marks a record for deletion and returns the confirmation prompt.
    pub fn request_delete(&mut self, id: RecordId) -> &'static str {
        self.pending_delete = Some(id);
        R::TEXTS.confirm_delete
    }

    /// The id to delete, once the user has confirmed.
    pub fn confirm_delete(&mut self) -> Option<RecordId> {
        self.pending_delete.take()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn deleted(&mut self, id: &RecordId, result: Result<bool, ClientError>) -> Option<&'static str> {
        match result {
            Ok(_) => {
                self.records.remove(id);
                self.error = None;
                Some(R::TEXTS.deleted)
            }
            Err(err) => {
                tracing::error!(
                    resource = R::path(),
                    id = %id,
                    error = %err,
                    detail = err.detail().unwrap_or_default(),
                    "failed to delete record"
                );
                self.error = Some(R::TEXTS.delete_error.to_string());
                None
            }
        }
    }
}

impl<R: Editable> Default for Editor<R> {
    fn default() -> Self {
        Editor::new()
    }
}
