//! The space-owned contact arena.
//!
//! Active arbiters do not own their contacts; they hold `Arena { start, len }`
//! handles into this buffer.  The buffer only ever appends — a handle stays
//! valid for as long as the arbiter is live, and the custody transfer to a
//! private heap block happens before anything could invalidate it (a
//! sleeping arbiter never holds an arena handle).  Steady-state contact
//! refreshes overwrite their existing slice in place, so the buffer does not
//! grow while nothing changes.

use rb_dynamics::Contact;

/// Append-only arena for the contacts of all live arbiters.
#[derive(Default)]
pub struct ContactBuffer {
    buf: Vec<Contact>,
}

impl ContactBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy `contacts` to the end of the buffer, advancing the watermark.
    /// Returns the `(start, len)` handle for an arena storage.
    pub fn push_slice(&mut self, contacts: &[Contact]) -> (usize, usize) {
        let start = self.buf.len();
        self.buf.extend_from_slice(contacts);
        (start, contacts.len())
    }

    /// Overwrite an existing slice without moving it.
    ///
    /// # Panics
    ///
    /// Panics if the target range is out of bounds.
    pub fn write_in_place(&mut self, start: usize, contacts: &[Contact]) {
        self.buf[start..start + contacts.len()].copy_from_slice(contacts);
    }

    #[inline]
    pub fn slice(&self, start: usize, len: usize) -> &[Contact] {
        &self.buf[start..start + len]
    }

    #[inline]
    pub fn slice_mut(&mut self, start: usize, len: usize) -> &mut [Contact] {
        &mut self.buf[start..start + len]
    }

    /// Current high-water mark (total contacts ever appended).
    #[inline]
    pub fn watermark(&self) -> usize {
        self.buf.len()
    }
}
