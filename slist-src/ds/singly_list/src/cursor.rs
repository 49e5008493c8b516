use std::ptr::NonNull;

#[cfg(feature = "log")]
use log::debug;

use crate::{List, ListError, ListNode, RawAlloc};

/// A position inside a [`List`], created by [`List::cursor`].
///
/// The cursor borrows nothing. Each operation takes the list again and
/// checks it against the identity and version captured at creation, so a
/// cursor that outlives an insertion or removal is rejected instead of
/// reading a released node.
#[derive(Debug)]
pub struct Cursor {
    list_id: usize,
    version: usize,
    node: NonNull<ListNode>,
    index: usize,
    val: u32,
}

impl Cursor {
    pub(crate) fn new<A: RawAlloc>(
        list: &List<A>,
        node: NonNull<ListNode>,
        index: usize,
    ) -> Self {
        let val = unsafe { (*node.as_ptr()).val };
        Self { list_id: list.id(), version: list.version(), node, index, val }
    }

    pub fn index(&self) -> usize { self.index }

    /// The value of the current node, as of the last successful move.
    pub fn value(&self) -> u32 { self.val }

    pub fn is_valid<A: RawAlloc>(&self, list: &List<A>) -> bool {
        self.check(list).is_ok()
    }

    /// Moves to the next node.
    ///
    /// Returns `Ok(false)` and stays put when the cursor is on the last
    /// node.
    pub fn advance<A: RawAlloc>(
        &mut self,
        list: &List<A>,
    ) -> Result<bool, ListError> {
        self.check(list)?;
        let Some(next) = (unsafe { (*self.node.as_ptr()).next }) else {
            return Ok(false);
        };
        self.node = next;
        self.index += 1;
        self.val = unsafe { (*next.as_ptr()).val };
        Ok(true)
    }

    fn check<A: RawAlloc>(&self, list: &List<A>) -> Result<(), ListError> {
        if self.list_id != list.id() {
            return Err(ListError::ForeignCursor);
        }
        if self.version != list.version() {
            debug!(
                "list #{}: stale cursor at index {} (version {} != {})",
                self.list_id,
                self.index,
                self.version,
                list.version()
            );
            return Err(ListError::StaleCursor);
        }
        Ok(())
    }
}
