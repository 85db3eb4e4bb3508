//! Descriptor store with transactional edit semantics
//!
//! The store is the single source of truth for one descriptor during an
//! edit session. It keeps a working copy and a checkpoint snapshot:
//! [`DescriptorStore::patch`] mutates the working copy,
//! [`DescriptorStore::commit`] promotes it to the checkpoint, and
//! [`DescriptorStore::revert`] restores the working copy from the
//! checkpoint. The store never validates descriptor content; validation
//! happens server-side through report generation.
//!
//! Host callbacks (`on_change`, `on_commit`, `on_revert`) are synchronous
//! notifications, invoked inline before the mutating call returns.

use crate::descriptor::Descriptor;
use tracing::debug;

/// Synchronous session lifecycle callback
pub type SessionCallback = Box<dyn Fn(&Descriptor)>;

/// Single source of truth for one descriptor during an edit session
pub struct DescriptorStore {
    working: Descriptor,
    checkpoint: Descriptor,
    dirty: bool,
    on_change: Option<SessionCallback>,
    on_commit: Option<SessionCallback>,
    on_revert: Option<SessionCallback>,
}

impl DescriptorStore {
    /// Open an edit session on `initial`.
    ///
    /// Both the working copy and the checkpoint are independent deep
    /// copies of the supplied descriptor.
    pub fn new(initial: Descriptor) -> Self {
        Self {
            working: initial.clone(),
            checkpoint: initial,
            dirty: false,
            on_change: None,
            on_commit: None,
            on_revert: None,
        }
    }

    /// Install a callback fired after every `patch`
    pub fn with_on_change(mut self, callback: impl Fn(&Descriptor) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Install a callback fired after every `commit`
    pub fn with_on_commit(mut self, callback: impl Fn(&Descriptor) + 'static) -> Self {
        self.on_commit = Some(Box::new(callback));
        self
    }

    /// Install a callback fired after every `revert`
    pub fn with_on_revert(mut self, callback: impl Fn(&Descriptor) + 'static) -> Self {
        self.on_revert = Some(Box::new(callback));
        self
    }

    /// The current working descriptor
    pub fn descriptor(&self) -> &Descriptor {
        &self.working
    }

    /// The last committed snapshot
    pub fn checkpoint(&self) -> &Descriptor {
        &self.checkpoint
    }

    /// True iff a `patch` occurred since the last commit/revert/open
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Shallow-merge `fields` onto the working descriptor.
    ///
    /// Top-level keys only: nested structures are replaced wholesale by
    /// the caller's value. Fires `on_change` synchronously with the new
    /// working descriptor.
    pub fn patch(&mut self, fields: Descriptor) {
        debug!(fields = fields.len(), "patching descriptor");
        self.working.merge(fields.into_map());
        self.dirty = true;
        if let Some(callback) = &self.on_change {
            callback(&self.working);
        }
    }

    /// Replace the working descriptor wholesale.
    ///
    /// Used by descriptor import, where the incoming document supersedes
    /// every field of the working copy. Marks the session dirty and fires
    /// `on_change` like `patch`; the checkpoint is untouched, so `revert`
    /// still restores the pre-import state.
    pub fn replace(&mut self, descriptor: Descriptor) {
        debug!(name = descriptor.name(), "replacing descriptor");
        self.working = descriptor;
        self.dirty = true;
        if let Some(callback) = &self.on_change {
            callback(&self.working);
        }
    }

    /// Promote the working descriptor to the checkpoint
    pub fn commit(&mut self) {
        debug!(name = self.working.name(), "committing descriptor");
        self.checkpoint = self.working.clone();
        self.dirty = false;
        if let Some(callback) = &self.on_commit {
            callback(&self.working);
        }
    }

    /// Restore the working descriptor from the checkpoint.
    ///
    /// The working copy becomes a fresh deep copy, never an alias of the
    /// checkpoint. Fires `on_revert` but never `on_change`.
    pub fn revert(&mut self) {
        debug!(name = self.checkpoint.name(), "reverting descriptor");
        self.working = self.checkpoint.clone();
        self.dirty = false;
        if let Some(callback) = &self.on_revert {
            callback(&self.working);
        }
    }
}

impl std::fmt::Debug for DescriptorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptorStore")
            .field("working", &self.working)
            .field("checkpoint", &self.checkpoint)
            .field("dirty", &self.dirty)
            .finish()
    }
}
