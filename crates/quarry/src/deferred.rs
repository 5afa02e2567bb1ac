use crate::{Entity, Error, Identity, Result};

use indexmap::IndexMap;
use quarry_core::stmt::{Record, Value};

/// Which deferred set a write sits in, and which statement flushes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    /// Flushed as INSERT.
    Create,

    /// Flushed as UPDATE.
    Save,

    /// Flushed as DELETE.
    Delete,
}

impl WriteKind {
    /// Flush order.
    pub(crate) const ALL: [WriteKind; 3] = [WriteKind::Create, WriteKind::Save, WriteKind::Delete];
}

/// Snapshot of an entity taken when it was registered.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingWrite {
    /// Rust type name of the entity, for diagnostics.
    pub entity: &'static str,
    pub table: &'static str,
    pub id_field: &'static str,
    pub id: Value,
    pub record: Record,
}

impl PendingWrite {
    pub(crate) fn capture<T: Entity>(entity: &T) -> Result<Self> {
        let record = entity.storable_record()?;
        let id = record.get(T::id_field()).cloned().unwrap_or_default();

        Ok(Self {
            entity: std::any::type_name::<T>(),
            table: T::table_name(),
            id_field: T::id_field(),
            id,
            record,
        })
    }
}

/// Number of writes waiting in each set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Pending {
    pub create: usize,
    pub save: usize,
    pub delete: usize,
}

impl Pending {
    pub fn total(&self) -> usize {
        self.create + self.save + self.delete
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// The create, save and delete sets. An identity sits in at most one of
/// them; registering it in one set takes it out of the others. Within a set,
/// an identity keeps the position of its first registration.
#[derive(Debug, Default)]
pub(crate) struct DeferredWrites {
    create: IndexMap<Identity, PendingWrite>,
    save: IndexMap<Identity, PendingWrite>,
    delete: IndexMap<Identity, PendingWrite>,
}

impl DeferredWrites {
    pub(crate) fn create(&mut self, identity: Identity, write: PendingWrite) {
        self.save.shift_remove(&identity);
        self.delete.shift_remove(&identity);
        self.create.insert(identity, write);
    }

    /// Saving an entity that is still pending creation refreshes the
    /// snapshot to be inserted.
    pub(crate) fn save(&mut self, identity: Identity, write: PendingWrite) -> Result<()> {
        if let Some(pending) = self.create.get_mut(&identity) {
            *pending = write;
            return Ok(());
        }

        if write.id.is_null() {
            return Err(Error::invalid_argument(format!(
                "cannot save `{}` without a value for `{}`",
                write.entity, write.id_field
            )));
        }

        self.delete.shift_remove(&identity);
        self.save.insert(identity, write);
        Ok(())
    }

    /// Deleting an entity that was only pending creation and has no id
    /// cancels the creation; nothing is flushed for it. A rejected delete
    /// leaves every set untouched.
    pub(crate) fn delete(&mut self, identity: Identity, write: PendingWrite) -> Result<()> {
        if write.id.is_null() && !self.create.contains_key(&identity) {
            return Err(Error::invalid_argument(format!(
                "cannot delete `{}` without a value for `{}`",
                write.entity, write.id_field
            )));
        }

        self.create.shift_remove(&identity);
        self.save.shift_remove(&identity);

        if !write.id.is_null() {
            self.delete.insert(identity, write);
        }
        Ok(())
    }

    /// Returns `true` if the identity was pending.
    pub(crate) fn clear(&mut self, identity: &Identity) -> bool {
        WriteKind::ALL
            .into_iter()
            .any(|kind| self.set_mut(kind).shift_remove(identity).is_some())
    }

    pub(crate) fn clear_all(&mut self) {
        self.create.clear();
        self.save.clear();
        self.delete.clear();
    }

    pub(crate) fn kind_of(&self, identity: &Identity) -> Option<WriteKind> {
        WriteKind::ALL
            .into_iter()
            .find(|kind| self.set(*kind).contains_key(identity))
    }

    pub(crate) fn pending(&self) -> Pending {
        Pending {
            create: self.create.len(),
            save: self.save.len(),
            delete: self.delete.len(),
        }
    }

    pub(crate) fn front(&self, kind: WriteKind) -> Option<&PendingWrite> {
        self.set(kind).first().map(|(_, write)| write)
    }

    pub(crate) fn pop_front(&mut self, kind: WriteKind) {
        self.set_mut(kind).shift_remove_index(0);
    }

    pub(crate) fn iter(&self, kind: WriteKind) -> impl Iterator<Item = (&Identity, &PendingWrite)> {
        self.set(kind).iter()
    }

    fn set(&self, kind: WriteKind) -> &IndexMap<Identity, PendingWrite> {
        match kind {
            WriteKind::Create => &self.create,
            WriteKind::Save => &self.save,
            WriteKind::Delete => &self.delete,
        }
    }

    fn set_mut(&mut self, kind: WriteKind) -> &mut IndexMap<Identity, PendingWrite> {
        match kind {
            WriteKind::Create => &mut self.create,
            WriteKind::Save => &mut self.save,
            WriteKind::Delete => &mut self.delete,
        }
    }
}
