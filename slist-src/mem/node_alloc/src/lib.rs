//! Allocation strategies for list nodes.
//!
//! A list owns one [`RawAlloc`] value for its whole lifetime, so every
//! node is released by the allocator that produced it.
//!
//! ```
//! use std::alloc::Layout;
//!
//! use node_alloc::{CountingAlloc, RawAlloc};
//!
//! let counter = CountingAlloc::new();
//! let layout = Layout::new::<u64>();
//! let ptr = counter.allocate(layout).unwrap();
//! assert_eq!(counter.live(), 1);
//! unsafe { counter.deallocate(ptr, layout) };
//! assert_eq!(counter.live(), 0);
//! ```

use std::{alloc::Layout, cell::Cell, ptr::NonNull};

#[cfg(feature = "log")]
use log::debug;

#[cfg(not(feature = "log"))]
macro_rules! debug {
    ($($t:tt)*) => {};
}

/// # Safety
///
/// A pointer returned by `allocate(layout)` must be valid for reads and
/// writes of `layout.size()` bytes, aligned to `layout.align()`, until it
/// is passed back to `deallocate` with the same layout.
pub unsafe trait RawAlloc {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// # Safety
    ///
    /// `ptr` must come from `self.allocate(layout)` and must not have been
    /// released yet.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

unsafe impl<A: RawAlloc + ?Sized> RawAlloc for &A {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        (**self).allocate(layout)
    }
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        (**self).deallocate(ptr, layout)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SystemAlloc;

unsafe impl RawAlloc for SystemAlloc {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        NonNull::new(system_alloc(layout))
    }
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        system_dealloc(ptr.as_ptr(), layout)
    }
}

pub type AllocFn = fn(Layout) -> *mut u8;
pub type DeallocFn = unsafe fn(*mut u8, Layout);

/// Returns null for zero-sized layouts instead of invoking the global
/// allocator.
pub fn system_alloc(layout: Layout) -> *mut u8 {
    if layout.size() == 0 {
        return std::ptr::null_mut();
    }
    unsafe { std::alloc::alloc(layout) }
}

/// # Safety
///
/// `ptr` must come from [`system_alloc`] with the same layout.
pub unsafe fn system_dealloc(ptr: *mut u8, layout: Layout) {
    if !ptr.is_null() {
        std::alloc::dealloc(ptr, layout)
    }
}

/// A pair of function slots.
///
/// The allocator and deallocator are registered on this value before it
/// is handed to a list. A slot that is never registered falls back to
/// [`system_alloc`] / [`system_dealloc`].
#[derive(Clone, Copy)]
pub struct HookAlloc {
    alloc_fn: AllocFn,
    dealloc_fn: DeallocFn,
}

impl HookAlloc {
    pub fn new() -> Self {
        Self { alloc_fn: system_alloc, dealloc_fn: system_dealloc }
    }
    /// # Safety
    ///
    /// A non-null pointer returned by `alloc_fn(layout)` must satisfy the
    /// contract of [`RawAlloc::allocate`].
    pub unsafe fn register_allocator(&mut self, alloc_fn: AllocFn) -> bool {
        debug!("allocator hook registered");
        self.alloc_fn = alloc_fn;
        true
    }
    /// # Safety
    ///
    /// `dealloc_fn` must accept every pointer the registered allocator
    /// returns, together with the layout it was requested with.
    pub unsafe fn register_deallocator(
        &mut self,
        dealloc_fn: DeallocFn,
    ) -> bool {
        debug!("deallocator hook registered");
        self.dealloc_fn = dealloc_fn;
        true
    }
}

impl Default for HookAlloc {
    fn default() -> Self { Self::new() }
}

impl std::fmt::Debug for HookAlloc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookAlloc")
            .field("alloc_fn", &(self.alloc_fn as *const ()))
            .field("dealloc_fn", &(self.dealloc_fn as *const ()))
            .finish()
    }
}

unsafe impl RawAlloc for HookAlloc {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        NonNull::new((self.alloc_fn)(layout))
    }
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        (self.dealloc_fn)(ptr.as_ptr(), layout)
    }
}

/// Tracks live allocations of the wrapped allocator.
///
/// Meant to be shared by reference, e.g. `List::new_in(&counter)`.
#[derive(Debug, Default)]
pub struct CountingAlloc<A = SystemAlloc> {
    inner: A,
    live: Cell<usize>,
    live_bytes: Cell<usize>,
    total: Cell<usize>,
}

impl CountingAlloc {
    pub fn new() -> Self { Self::with(SystemAlloc) }
}

impl<A> CountingAlloc<A> {
    pub fn with(inner: A) -> Self {
        Self {
            inner,
            live: Cell::new(0),
            live_bytes: Cell::new(0),
            total: Cell::new(0),
        }
    }
    pub fn live(&self) -> usize { self.live.get() }
    pub fn live_bytes(&self) -> usize { self.live_bytes.get() }
    pub fn total(&self) -> usize { self.total.get() }
}

unsafe impl<A: RawAlloc> RawAlloc for CountingAlloc<A> {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        let ptr = self.inner.allocate(layout)?;
        self.live.set(self.live.get() + 1);
        self.live_bytes.set(self.live_bytes.get() + layout.size());
        self.total.set(self.total.get() + 1);
        Some(ptr)
    }
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        debug_assert!(self.live.get() > 0);
        self.live.set(self.live.get() - 1);
        self.live_bytes.set(self.live_bytes.get() - layout.size());
        self.inner.deallocate(ptr, layout)
    }
}

/// Serves `n` allocations, then reports failure for every later one.
#[derive(Debug)]
pub struct FailAfter<A = SystemAlloc> {
    inner: A,
    remaining: Cell<usize>,
}

impl FailAfter {
    pub fn new(n: usize) -> Self { Self::with(SystemAlloc, n) }
}

impl<A> FailAfter<A> {
    pub fn with(inner: A, n: usize) -> Self {
        Self { inner, remaining: Cell::new(n) }
    }
    pub fn remaining(&self) -> usize { self.remaining.get() }
    pub fn refill(&self, n: usize) { self.remaining.set(n) }
}

unsafe impl<A: RawAlloc> RawAlloc for FailAfter<A> {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        let remaining = self.remaining.get();
        if remaining == 0 {
            debug!("allocation of {} bytes refused", layout.size());
            return None;
        }
        self.remaining.set(remaining - 1);
        self.inner.allocate(layout)
    }
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.inner.deallocate(ptr, layout)
    }
}
