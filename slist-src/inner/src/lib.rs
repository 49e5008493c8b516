/// Re-exports each leaf crate and its items so that rustdoc renders them
/// inline under the category crate.
#[macro_export]
macro_rules! doc_inline_reexport {
    ( $($lib:ident,)* ) => { $(
        #[doc(inline)]
        pub use $lib::{self, *};
    )* };
}
