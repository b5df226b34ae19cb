//! Traits deciding which callables a view can bind.
//!
//! A view calls its callable with the argument tuple of its [`Signature`].
//! These traits describe how a concrete callable is called with such a tuple:
//!
//! - [`InvokeRef`]: through a shared reference, used by [`FunctionView`].
//!   Implemented for every `F: Fn(A1, .., An) -> R`.
//! - [`InvokeMut`]: through a mutable reference, used by
//!   [`FunctionViewMut::new`]. Implemented for every
//!   `F: FnMut(A1, .., An) -> R`.
//! - [`FnPointer`]: a plain function pointer bound by value, used by the
//!   `from_fn*` constructors. Implemented for every `fn(A1, .., An) -> R`.
//!
//! # Function Objects
//!
//! Stable Rust does not allow implementing the `Fn*` traits for your own
//! types. Implement [`InvokeRef`] or [`InvokeMut`] instead to make a struct
//! bindable:
//!
//! ```
//! use fnview::{FunctionView, invoke::InvokeRef};
//!
//! struct Threshold {
//!     limit: i32,
//! }
//!
//! impl InvokeRef<(i32,)> for Threshold {
//!     type Output = bool;
//!
//!     fn invoke_ref(&self, (x,): (i32,)) -> bool {
//!         x > self.limit
//!     }
//! }
//!
//! let threshold = Threshold { limit: 5 };
//! let view = FunctionView::<fn(i32) -> bool>::new(&threshold);
//! assert!(!view.call(3));
//! assert!(view.call(7));
//! ```
//!
//! Views themselves implement none of these traits. Passing a view where a
//! callable is expected does not wrap it in a second view; copy it instead.
//!
//! ```compile_fail
//! use fnview::FunctionView;
//!
//! let negate = |x: i32| -x;
//! let inner = FunctionView::<fn(i32) -> i32>::new(&negate);
//! let outer = FunctionView::<fn(i32) -> i32>::new(&inner);
//! ```
//!
//! [`Signature`]: crate::Signature
//! [`FunctionView`]: crate::FunctionView
//! [`FunctionViewMut::new`]: crate::FunctionViewMut::new

pub use fnview_internals::invoke::{FnPointer, InvokeMut, InvokeRef};
