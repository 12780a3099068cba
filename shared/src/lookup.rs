//! Referenced collections loaded only to fill form selectors and to resolve
//! bare foreign keys in tables.

use crate::client::{ClientError, ResourceClient, Transport};
use crate::config::ApiConfig;
use crate::form::Choice;
use crate::models::{activity::Activity, course::Course, person::Person};
use crate::reference::Linked;
use crate::resource::{Resource, ResourceKind};

/// A resource some other module needs options from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    Persons,
    Courses,
    Activities,
}

impl Dependency {
    pub fn kind(self) -> ResourceKind {
        match self {
            Dependency::Persons => ResourceKind::Persons,
            Dependency::Courses => ResourceKind::Courses,
            Dependency::Activities => ResourceKind::Activities,
        }
    }
}

#[derive(Debug, Clone)]
pub enum LookupData {
    Persons(Vec<Person>),
    Courses(Vec<Course>),
    Activities(Vec<Activity>),
}

#[derive(Debug, Clone, Default)]
pub struct Lookups {
    pub persons: Vec<Person>,
    pub courses: Vec<Course>,
    pub activities: Vec<Activity>,
}

impl Lookups {
    pub fn fill(&mut self, data: LookupData) {
        match data {
            LookupData::Persons(persons) => self.persons = persons,
            LookupData::Courses(courses) => self.courses = courses,
            LookupData::Activities(activities) => self.activities = activities,
        }
    }

    /// "Nombre Apellido" of a referenced person, or "N/A".
    pub fn person_name(&self, link: Option<&Linked<Person>>) -> String {
        link.and_then(|link| link.resolve(&self.persons))
            .map(Person::full_name)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn course_name(&self, link: Option<&Linked<Course>>) -> Option<String> {
        link.and_then(|link| link.resolve(&self.courses))
            .map(|course| course.name.clone())
    }

    pub fn activity_name(&self, link: Option<&Linked<Activity>>) -> Option<String> {
        link.and_then(|link| link.resolve(&self.activities))
            .map(|activity| activity.name.clone())
    }

    pub fn person_choices(&self, label: fn(&Person) -> String) -> Vec<Choice> {
        choices(&self.persons, label)
    }

    pub fn course_choices(&self) -> Vec<Choice> {
        choices(&self.courses, |course| course.name.clone())
    }

    pub fn activity_choices(&self) -> Vec<Choice> {
        choices(&self.activities, |activity| activity.name.clone())
    }
}

pub const NOT_AVAILABLE: &str = "N/A";

fn choices<R: Resource>(records: &[R], label: impl Fn(&R) -> String) -> Vec<Choice> {
    records
        .iter()
        .filter_map(|record| record.id().map(|id| Choice::new(id.to_string(), label(record))))
        .collect()
}

/// Lists one dependency. Independent of the primary load; callers run them
/// side by side and apply results in whatever order they arrive.
pub async fn fetch_lookup<T: Transport>(
    config: &ApiConfig,
    transport: T,
    dependency: Dependency,
) -> Result<LookupData, ClientError> {
    match dependency {
        Dependency::Persons => ResourceClient::<Person, T>::new(config.clone(), transport)
            .list_all()
            .await
            .map(LookupData::Persons),
        Dependency::Courses => ResourceClient::<Course, T>::new(config.clone(), transport)
            .list_all()
            .await
            .map(LookupData::Courses),
        Dependency::Activities => ResourceClient::<Activity, T>::new(config.clone(), transport)
            .list_all()
            .await
            .map(LookupData::Activities),
    }
}
