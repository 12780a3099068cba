use crate::id::RecordId;
use crate::resource::Resource;

/// In-memory records of one resource in display order, addressed by id.
#[derive(Debug, Clone)]
pub struct Collection<R> {
    records: Vec<R>,
}

impl<R: Resource> Collection<R> {
    pub fn new() -> Self {
        Collection { records: vec![] }
    }

    pub fn replace_all(&mut self, records: Vec<R>) {
        self.records = records;
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn append(&mut self, record: R) {
        self.records.push(record);
    }

    /// Swap the record with the same id for `record`, keeping its position.
    /// Returns false when no record matches.
    pub fn replace(&mut self, record: R) -> bool {
        let slot = record
            .id()
            .and_then(|id| self.records.iter().position(|r| r.id() == Some(id)));
        match slot {
            Some(index) => {
                self.records[index] = record;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &RecordId) -> Option<R> {
        let index = self.records.iter().position(|r| r.id() == Some(id))?;
        Some(self.records.remove(index))
    }

    pub fn get(&self, id: &RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == Some(id))
    }

    pub fn as_slice(&self) -> &[R] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<R: Resource> Default for Collection<R> {
    fn default() -> Self {
        Collection::new()
    }
}
