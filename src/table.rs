//! Fixed-capacity tables mapping caller-chosen handles to native resources.

use log::warn;

use crate::error::{Error, Result};

/// Default capacity for a resource table.
///
/// A tuning constant, not a protocol invariant: large enough that a host
/// practically never exhausts it. Slots are grown lazily, so an
/// instantiated table costs nothing until handles are actually used.
pub const DEFAULT_CAPACITY: usize = 99_999;

/// A fixed-capacity, integer-indexed store of native resources.
///
/// Handles are small non-negative integers chosen by the *caller*, not
/// issued by the table; a handle indexes its slot directly. A slot holds at
/// most one live resource. Loading over a live slot replaces the resource
/// (last write wins) and drops the previous occupant — the caller-visible
/// behaviour hosts rely on, but usually a host bookkeeping bug, so it is
/// logged.
///
/// Every access is bounds-checked: a negative handle, a handle at or past
/// the capacity, or a lookup of an empty slot is
/// [`Error::InvalidHandle`], never an out-of-bounds access.
///
/// ```
/// use ext_ray_rs::table::ResourceTable;
///
/// let mut models: ResourceTable<String> = ResourceTable::new(8);
/// models.load(3, "teapot".into()).unwrap();
/// assert_eq!(models.get(3).unwrap(), "teapot");
/// models.unload(3).unwrap();
/// assert!(models.get(3).is_err());
/// ```
#[derive(Debug)]
pub struct ResourceTable<T> {
    slots: Vec<Option<T>>,
    capacity: usize,
}

impl<T> ResourceTable<T> {
    /// Creates an empty table with room for handles `0..capacity`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            capacity,
        }
    }

    /// The table's handle capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether the table holds no live resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    fn index(&self, handle: i32) -> Result<usize> {
        let index = usize::try_from(handle).map_err(|_| Error::InvalidHandle(handle))?;
        if index >= self.capacity {
            return Err(Error::InvalidHandle(handle));
        }
        Ok(index)
    }

    /// Checks that `handle` addresses a slot inside the table, without
    /// touching it. Lets a caller reject a bad handle before it creates
    /// the resource it intends to install.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidHandle`] if `handle` is negative or at or past the
    /// capacity.
    pub fn check_handle(&self, handle: i32) -> Result<()> {
        self.index(handle).map(|_| ())
    }

    /// Installs `resource` at slot `handle`.
    ///
    /// If the slot is already occupied the previous resource is dropped
    /// and a warning is logged; the table never refuses a valid handle.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidHandle`] if `handle` is negative or at or past the
    /// capacity. The table is unchanged on error.
    pub fn load(&mut self, handle: i32, resource: T) -> Result<()> {
        let index = self.index(handle)?;
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }
        if self.slots[index].is_some() {
            warn!("resource handle {handle} reloaded without an unload; dropping previous");
        }
        self.slots[index] = Some(resource);
        Ok(())
    }

    /// Borrows the resource at slot `handle`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidHandle`] if `handle` is out of range or the slot is
    /// empty.
    pub fn get(&self, handle: i32) -> Result<&T> {
        let index = self.index(handle)?;
        self.slots
            .get(index)
            .and_then(Option::as_ref)
            .ok_or(Error::InvalidHandle(handle))
    }

    /// Mutably borrows the resource at slot `handle`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidHandle`] if `handle` is out of range or the slot is
    /// empty.
    pub fn get_mut(&mut self, handle: i32) -> Result<&mut T> {
        let index = self.index(handle)?;
        self.slots
            .get_mut(index)
            .and_then(Option::as_mut)
            .ok_or(Error::InvalidHandle(handle))
    }

    /// Removes and returns the resource at slot `handle`, leaving the slot
    /// empty and reusable.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidHandle`] if `handle` is out of range or the slot is
    /// already empty. Unloading an empty slot is an error, not a no-op: it
    /// keeps `unload` consistent with `get` and surfaces double-unload
    /// bugs in the host.
    pub fn unload(&mut self, handle: i32) -> Result<T> {
        let index = self.index(handle)?;
        self.slots
            .get_mut(index)
            .and_then(Option::take)
            .ok_or(Error::InvalidHandle(handle))
    }
}
