//! Handle-based surface over [`singly_list`].
//!
//! Handles are `Option`s, with `None` standing for a null handle. Every
//! failure is reported as `false` or as a sentinel, never as a
//! distinguishable error.
//!
//! The storage behind a handle comes from the same [`RawAlloc`] as the
//! nodes: a [`ListHandle`] lives in memory obtained from the allocator
//! it was created with, and an [`IterHandle`] from its list's allocator.
//! Creating either one fails with `None` when that allocator refuses.
//!
//! ## Sentinels
//!
//! [`NOT_FOUND`] and [`INVALID_SIZE`] are both `usize::MAX`, which is
//! also a representable index and size. No list can reach that length,
//! since each node occupies more than one byte. Callers that need an
//! unambiguous answer should use [`List::find`] and [`List::len`]
//! directly.
//!
//! ```
//! use handle_api::*;
//!
//! let mut list = list_create();
//! assert!(list_insert_end(list.as_deref_mut(), 5));
//! assert!(list_insert_end(list.as_deref_mut(), 7));
//! assert!(list_insert_front(list.as_deref_mut(), 3));
//! assert_eq!(list_size(list.as_deref()), 3);
//! assert_eq!(list_find(list.as_deref(), 5), 1);
//!
//! let mut it = iterator_create(list.as_deref(), 0);
//! assert_eq!(it.as_ref().map(|it| it.data()), Some(3));
//! assert!(iterator_advance(it.as_mut()));
//! assert!(iterator_destroy(it));
//!
//! assert!(list_destroy(list));
//! assert_eq!(list_size::<SystemAlloc>(None), INVALID_SIZE);
//! ```

use std::{
    alloc::Layout,
    fmt,
    marker::PhantomData,
    ops::{Deref, DerefMut},
    ptr::NonNull,
};

use node_alloc::{AllocFn, DeallocFn, HookAlloc};
pub use node_alloc::{RawAlloc, SystemAlloc};
use singly_list::{Cursor, List};

pub const NOT_FOUND: usize = usize::MAX;
pub const INVALID_SIZE: usize = usize::MAX;

/// A list whose header lives in memory from its own allocator.
pub struct ListHandle<A: RawAlloc = SystemAlloc> {
    list: NonNull<List<A>>,
    _marker: PhantomData<List<A>>,
}

struct IterObject<'a, A: RawAlloc> {
    list: &'a List<A>,
    cursor: Cursor,
}

/// An iterator object: a cursor paired with the list it walks.
///
/// The shared borrow keeps the list from being mutated while the
/// iterator is alive.
pub struct IterHandle<'a, A: RawAlloc = SystemAlloc> {
    obj: NonNull<IterObject<'a, A>>,
    _marker: PhantomData<IterObject<'a, A>>,
}

impl<A: RawAlloc> Deref for ListHandle<A> {
    type Target = List<A>;
    fn deref(&self) -> &List<A> { unsafe { self.list.as_ref() } }
}

impl<A: RawAlloc> DerefMut for ListHandle<A> {
    fn deref_mut(&mut self) -> &mut List<A> { unsafe { self.list.as_mut() } }
}

impl<A: RawAlloc> Drop for ListHandle<A> {
    fn drop(&mut self) {
        // the allocator lives inside the header, so move the list out first
        let list = unsafe { self.list.as_ptr().read() };
        unsafe {
            list.allocator()
                .deallocate(self.list.cast(), Layout::new::<List<A>>())
        };
    }
}

impl<A: RawAlloc> fmt::Debug for ListHandle<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt(f)
    }
}

impl<'a, A: RawAlloc> IterHandle<'a, A> {
    pub fn list(&self) -> &'a List<A> { self.obj().list }
    pub fn index(&self) -> usize { self.obj().cursor.index() }
    pub fn data(&self) -> u32 { self.obj().cursor.value() }

    fn obj(&self) -> &IterObject<'a, A> { unsafe { self.obj.as_ref() } }
    fn advance(&mut self) -> bool {
        let obj = unsafe { self.obj.as_mut() };
        obj.cursor.advance(obj.list) == Ok(true)
    }
}

impl<A: RawAlloc> Drop for IterHandle<'_, A> {
    fn drop(&mut self) {
        let list = self.obj().list;
        unsafe {
            list.allocator()
                .deallocate(self.obj.cast(), Layout::new::<IterObject<A>>())
        };
    }
}

impl<A: RawAlloc> fmt::Debug for IterHandle<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterHandle")
            .field("index", &self.index())
            .field("data", &self.data())
            .finish()
    }
}

pub fn list_create() -> Option<ListHandle> { list_create_in(SystemAlloc) }

pub fn list_create_in<A: RawAlloc>(alloc: A) -> Option<ListHandle<A>> {
    let list = alloc.allocate(Layout::new::<List<A>>())?.cast::<List<A>>();
    unsafe { list.as_ptr().write(List::new_in(alloc)) };
    Some(ListHandle { list, _marker: PhantomData })
}

/// Releases every node, then the list itself.
pub fn list_destroy<A: RawAlloc>(list: Option<ListHandle<A>>) -> bool {
    list.map(drop).is_some()
}

pub fn list_size<A: RawAlloc>(list: Option<&List<A>>) -> usize {
    list.map_or(INVALID_SIZE, |list| list.len())
}

pub fn list_insert_front<A: RawAlloc>(
    list: Option<&mut List<A>>,
    data: u32,
) -> bool {
    list.is_some_and(|list| list.insert_front(data).is_ok())
}

pub fn list_insert_end<A: RawAlloc>(
    list: Option<&mut List<A>>,
    data: u32,
) -> bool {
    list.is_some_and(|list| list.insert_end(data).is_ok())
}

pub fn list_insert_at<A: RawAlloc>(
    list: Option<&mut List<A>>,
    index: usize,
    data: u32,
) -> bool {
    list.is_some_and(|list| list.insert_at(index, data).is_ok())
}

pub fn list_find<A: RawAlloc>(list: Option<&List<A>>, data: u32) -> usize {
    list.and_then(|list| list.find(data)).unwrap_or(NOT_FOUND)
}

pub fn list_remove_at<A: RawAlloc>(
    list: Option<&mut List<A>>,
    index: usize,
) -> bool {
    list.is_some_and(|list| list.remove_at(index).is_ok())
}

pub fn iterator_create<A: RawAlloc>(
    list: Option<&List<A>>,
    index: usize,
) -> Option<IterHandle<'_, A>> {
    let list = list?;
    let cursor = list.cursor(index).ok()?;
    let obj = list
        .allocator()
        .allocate(Layout::new::<IterObject<A>>())?
        .cast::<IterObject<A>>();
    unsafe { obj.as_ptr().write(IterObject { list, cursor }) };
    Some(IterHandle { obj, _marker: PhantomData })
}

/// Releases the iterator only; the list and its nodes are untouched.
pub fn iterator_destroy<A: RawAlloc>(iter: Option<IterHandle<A>>) -> bool {
    iter.map(drop).is_some()
}

/// Returns `false` at the last node, leaving the iterator in place.
pub fn iterator_advance<A: RawAlloc>(iter: Option<&mut IterHandle<A>>) -> bool {
    iter.is_some_and(|iter| iter.advance())
}

/// # Safety
///
/// See [`HookAlloc::register_allocator`].
pub unsafe fn register_allocator(
    hooks: &mut HookAlloc,
    alloc_fn: AllocFn,
) -> bool {
    hooks.register_allocator(alloc_fn)
}

/// # Safety
///
/// See [`HookAlloc::register_deallocator`].
pub unsafe fn register_deallocator(
    hooks: &mut HookAlloc,
    dealloc_fn: DeallocFn,
) -> bool {
    hooks.register_deallocator(dealloc_fn)
}
