//! Tab bookkeeping for the shell: which resource is on screen and which mount
//! of its editor is the live one.

use crate::resource::ResourceKind;

/// Tags one mount of an editor. Completions carrying an older tag are stale.
pub type Generation = u32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mounts {
    active: ResourceKind,
    generation: Generation,
}

impl Mounts {
    pub fn active(&self) -> ResourceKind {
        self.active
    }

    pub fn current(&self) -> Generation {
        self.generation
    }

    /// Shows `kind` under a fresh generation. Selecting the active tab again
    /// also remounts it.
    pub fn mount(&mut self, kind: ResourceKind) -> Generation {
        self.active = kind;
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Whether a message from the `kind` editor mounted as `generation` still
    /// belongs on screen.
    pub fn accepts(&self, kind: ResourceKind, generation: Generation) -> bool {
        kind == self.active && generation == self.generation
    }
}
