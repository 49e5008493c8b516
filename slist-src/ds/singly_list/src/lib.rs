//! Singly-linked list of `u32` values with positional insertion and removal.
//!
//! Every node is allocated through the [`RawAlloc`] value the list was
//! created with. Positional operations share one bounded walk from the
//! head, so `insert_at(0, _)` behaves as [`List::insert_front`] and
//! `insert_at(len, _)` as [`List::insert_end`].
//!
//! [`Extend`] and [`FromIterator`] have no way to report a refused
//! allocation and call [`std::alloc::handle_alloc_error`] instead. Use
//! [`List::insert_end`] in a loop to fill a list fallibly.
//!
//! ```
//! use singly_list::List;
//!
//! let mut list = List::new();
//! list.insert_end(5).unwrap();
//! list.insert_end(7).unwrap();
//! list.insert_front(3).unwrap();
//! assert!(list.iter().eq([3, 5, 7]));
//! assert_eq!(list.find(5), Some(1));
//!
//! assert_eq!(list.remove_at(0), Ok(3));
//! assert_eq!(list.back(), Some(7));
//! ```
//!
//! A [`Cursor`] remembers the list's version; any structural change made
//! after its creation turns it stale.
//!
//! ```
//! use singly_list::{List, ListError};
//!
//! let mut list: List = [3, 5, 7].into_iter().collect();
//! let mut cur = list.cursor(0).unwrap();
//! assert_eq!(cur.value(), 3);
//! assert_eq!(cur.advance(&list), Ok(true));
//! assert_eq!(cur.value(), 5);
//!
//! list.insert_end(9).unwrap();
//! assert_eq!(cur.advance(&list), Err(ListError::StaleCursor));
//! ```

use std::{
    alloc::Layout,
    fmt,
    marker::PhantomData,
    ptr::NonNull,
    sync::atomic::{AtomicUsize, Ordering},
};

#[cfg(feature = "log")]
use log::{debug, trace};

#[cfg(not(feature = "log"))]
macro_rules! debug {
    ($($t:tt)*) => {};
}
#[cfg(not(feature = "log"))]
macro_rules! trace {
    ($($t:tt)*) => {};
}

mod cursor;
mod error;

pub use cursor::Cursor;
pub use error::ListError;
pub use node_alloc::{RawAlloc, SystemAlloc};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

pub(crate) struct ListNode {
    pub(crate) val: u32,
    pub(crate) next: Option<NonNull<ListNode>>,
}

pub struct List<A: RawAlloc = SystemAlloc> {
    first_last: Option<(NonNull<ListNode>, NonNull<ListNode>)>,
    len: usize,
    id: usize,
    // bumped on every structural change
    version: usize,
    alloc: A,
    _marker: PhantomData<Box<ListNode>>,
}

pub struct Iter<'a> {
    next: Option<NonNull<ListNode>>,
    len: usize,
    _marker: PhantomData<&'a ListNode>,
}

impl List {
    pub fn new() -> Self { Self::new_in(SystemAlloc) }
}

impl<A: RawAlloc> List<A> {
    pub fn new_in(alloc: A) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        debug!("list #{id} created");
        Self {
            first_last: None,
            len: 0,
            id,
            version: 0,
            alloc,
            _marker: PhantomData,
        }
    }

    pub fn allocator(&self) -> &A { &self.alloc }
    pub fn len(&self) -> usize { self.len }
    pub fn is_empty(&self) -> bool { self.len == 0 }

    pub fn front(&self) -> Option<u32> {
        self.first_last.map(|(first, _)| unsafe { (*first.as_ptr()).val })
    }
    pub fn back(&self) -> Option<u32> {
        self.first_last.map(|(_, last)| unsafe { (*last.as_ptr()).val })
    }
    pub fn get(&self, index: usize) -> Option<u32> {
        self.walk(index).map(|node| unsafe { (*node.as_ptr()).val })
    }

    pub fn insert_front(&mut self, val: u32) -> Result<(), ListError> {
        let head = self.first_last.map(|(first, _)| first);
        let node = self.alloc_node(val, head)?;
        if let Some((first, _)) = &mut self.first_last {
            *first = node;
        } else {
            self.first_last = Some((node, node));
        }
        self.len += 1;
        self.touch();
        Ok(())
    }

    pub fn insert_end(&mut self, val: u32) -> Result<(), ListError> {
        let node = self.alloc_node(val, None)?;
        if let Some((_, last)) = &mut self.first_last {
            unsafe { (*last.as_ptr()).next = Some(node) };
            *last = node;
        } else {
            self.first_last = Some((node, node));
        }
        self.len += 1;
        self.touch();
        Ok(())
    }

    /// Inserts `val` so that it ends up at position `index`.
    ///
    /// Fails with [`ListError::IndexOutOfBounds`] if `index > len`. The
    /// list is left untouched when the walk or the allocation fails.
    pub fn insert_at(
        &mut self,
        index: usize,
        val: u32,
    ) -> Result<(), ListError> {
        if index == 0 {
            return self.insert_front(val);
        }
        if index == self.len {
            return self.insert_end(val);
        }
        let prev = self.walk(index - 1).ok_or_else(|| self.oob(index))?;
        let node = self.alloc_node(val, unsafe { (*prev.as_ptr()).next })?;
        unsafe { (*prev.as_ptr()).next = Some(node) };
        self.len += 1;
        self.touch();
        Ok(())
    }

    pub fn find(&self, val: u32) -> Option<usize> {
        self.iter().position(|x| x == val)
    }

    /// Unlinks the node at `index` and returns its value.
    pub fn remove_at(&mut self, index: usize) -> Result<u32, ListError> {
        let (first, last) = self.first_last.ok_or_else(|| self.oob(index))?;
        let removed = if index == 0 {
            let next = unsafe { (*first.as_ptr()).next };
            self.first_last = next.map(|next| (next, last));
            first
        } else {
            let prev = self.walk(index - 1).ok_or_else(|| self.oob(index))?;
            let removed = unsafe { (*prev.as_ptr()).next }
                .ok_or_else(|| self.oob(index))?;
            unsafe { (*prev.as_ptr()).next = (*removed.as_ptr()).next };
            if removed == last {
                self.first_last = Some((first, prev));
            }
            removed
        };
        self.len -= 1;
        self.touch();
        Ok(unsafe { self.release_node(removed) })
    }

    pub fn clear(&mut self) {
        let mut next = self.first_last.take().map(|(first, _)| first);
        while let Some(node) = next {
            next = unsafe { (*node.as_ptr()).next };
            unsafe { self.release_node(node) };
        }
        self.len = 0;
        self.touch();
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.first_last.map(|(first, _)| first),
            len: self.len,
            _marker: PhantomData,
        }
    }

    /// Creates a cursor at `index`, which must be less than `len`.
    pub fn cursor(&self, index: usize) -> Result<Cursor, ListError> {
        let node = self.walk(index).ok_or_else(|| self.oob(index))?;
        Ok(Cursor::new(self, node, index))
    }

    pub(crate) fn id(&self) -> usize { self.id }
    pub(crate) fn version(&self) -> usize { self.version }

    /// The node reached after following `index` links from the head.
    fn walk(&self, index: usize) -> Option<NonNull<ListNode>> {
        if index >= self.len {
            return None;
        }
        let (first, _) = self.first_last?;
        std::iter::successors(Some(first), |node| unsafe {
            (*node.as_ptr()).next
        })
        .nth(index)
    }

    fn oob(&self, index: usize) -> ListError {
        ListError::IndexOutOfBounds { index, len: self.len }
    }

    fn touch(&mut self) { self.version = self.version.wrapping_add(1) }

    fn alloc_node(
        &self,
        val: u32,
        next: Option<NonNull<ListNode>>,
    ) -> Result<NonNull<ListNode>, ListError> {
        let layout = Layout::new::<ListNode>();
        let node = match self.alloc.allocate(layout) {
            Some(ptr) => ptr.cast::<ListNode>(),
            None => {
                debug!("list #{}: node allocation failed", self.id);
                return Err(ListError::AllocFailed);
            }
        };
        unsafe { node.as_ptr().write(ListNode { val, next }) };
        trace!("list #{}: node {:p} <- {val}", self.id, node);
        Ok(node)
    }

    /// # Safety
    ///
    /// `node` must have been allocated by `self.alloc_node` and already be
    /// unlinked from the chain.
    unsafe fn release_node(&self, node: NonNull<ListNode>) -> u32 {
        let ListNode { val, .. } = node.as_ptr().read();
        self.alloc.deallocate(node.cast(), Layout::new::<ListNode>());
        trace!("list #{}: node {:p} -> {val}", self.id, node);
        val
    }
}

impl<A: RawAlloc> Drop for List<A> {
    fn drop(&mut self) {
        debug!("list #{} dropped with {} nodes", self.id, self.len);
        self.clear();
    }
}

impl<A: RawAlloc + Default> Default for List<A> {
    fn default() -> Self { Self::new_in(A::default()) }
}

impl<A: RawAlloc> Extend<u32> for List<A> {
    /// Aborts via [`std::alloc::handle_alloc_error`] if a node cannot be
    /// allocated, as the standard collections do.
    fn extend<I: IntoIterator<Item = u32>>(&mut self, iter: I) {
        for val in iter {
            if self.insert_end(val).is_err() {
                std::alloc::handle_alloc_error(Layout::new::<ListNode>());
            }
        }
    }
}

impl<A: RawAlloc + Default> FromIterator<u32> for List<A> {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut list = Self::default();
        list.extend(iter);
        list
    }
}

impl<'a, A: RawAlloc> IntoIterator for &'a List<A> {
    type Item = u32;
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Iter<'a> { self.iter() }
}

impl<A: RawAlloc, B: RawAlloc> PartialEq<List<B>> for List<A> {
    fn eq(&self, other: &List<B>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<A: RawAlloc> Eq for List<A> {}

impl<A: RawAlloc> fmt::Debug for List<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Iterator for Iter<'_> {
    type Item = u32;
    fn next(&mut self) -> Option<u32> {
        let node = self.next?;
        self.len -= 1;
        unsafe {
            self.next = (*node.as_ptr()).next;
            Some((*node.as_ptr()).val)
        }
    }
    fn size_hint(&self) -> (usize, Option<usize>) { (self.len, Some(self.len)) }
}

impl ExactSizeIterator for Iter<'_> {}
