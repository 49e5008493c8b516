//! Singly-linked `u32` list with pluggable node allocation.
//!
//! ## Contents
//!
//! - [`mem`]: node allocation strategies ([`RawAlloc`], [`HookAlloc`], ...)
//! - [`ds`]: the list itself ([`List`], [`Cursor`])
//! - [`handle`]: null-handle / sentinel surface ([`list_create`], ...)

use inner::doc_inline_reexport;

doc_inline_reexport! {
    mem,
    ds,
    handle,
}
