//! Domain records and the generic CRUD machinery shared by the browser
//! client and the mock backend.

pub mod client;
pub mod collection;
pub mod config;
pub mod dates;
pub mod editor;
pub mod form;
pub mod id;
pub mod lookup;
pub mod models;
pub mod reference;
pub mod resource;
pub mod shell;

pub use client::{ApiRequest, ApiResponse, ClientError, Method, ResourceClient, Submission, Transport};
pub use collection::Collection;
pub use config::ApiConfig;
pub use editor::{Editable, Editor, Phase, Texts};
pub use id::RecordId;
pub use lookup::{fetch_lookup, Dependency, LookupData, Lookups};
pub use models::{
    activity::Activity, course::Course, participation::Participation, person::Person,
};
pub use reference::{ForeignKey, Linked};
pub use resource::{Resource, ResourceKind};
pub use shell::{Generation, Mounts};
