#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Non-owning, allocation-free references to arbitrary callables.
//!
//! ## Overview
//!
//! A [`FunctionView`] is a two-word value that refers to a callable, be it a
//! free function, a function pointer, or a closure with or without captured
//! state, and calls it with a fixed signature. It is meant for transient
//! callbacks: the accepting function calls the view synchronously and never
//! keeps it past its return.
//!
//! Compared with the usual alternatives:
//!
//! - `impl Fn(..)` makes the accepting function generic, so it cannot be a
//!   method of a trait object and is monomorphized once per callback type.
//! - `Box<dyn Fn(..)>` allocates.
//! - `&dyn Fn(..)` is a fat pointer to a vtable with several entries, and
//!   needs an extra reference when the callable is a plain function pointer.
//! - `fn(..)` cannot capture state.
//!
//! A view has none of these costs. It stores the address of the callable next
//! to a single trampoline function that knows the callable's concrete type.
//!
//! ## Quick Example
//!
//! ```
//! use fnview::FunctionView;
//!
//! trait Scanner {
//!     // A non-generic method taking a callback, usable through `dyn Scanner`
//!     fn scan(&self, visit: FunctionView<'_, fn(u32) -> bool>) -> usize;
//! }
//!
//! struct Numbers(Vec<u32>);
//!
//! impl Scanner for Numbers {
//!     fn scan(&self, visit: FunctionView<'_, fn(u32) -> bool>) -> usize {
//!         self.0.iter().filter(|&&n| visit.call(n)).count()
//!     }
//! }
//!
//! let scanner: &dyn Scanner = &Numbers(vec![1, 8, 3, 12, 5]);
//!
//! let threshold = 4;
//! let above = |n: u32| n > threshold;
//! assert_eq!(scanner.scan(FunctionView::new(&above)), 3);
//!
//! fn is_even(n: u32) -> bool {
//!     n % 2 == 0
//! }
//! assert_eq!(scanner.scan(FunctionView::from_fn(is_even)), 2);
//! ```
//!
//! ## Signatures
//!
//! The signature of a view is named by a function pointer type: a
//! `FunctionView<'a, fn(A, B) -> R>` takes an `A` and a `B` and returns an
//! `R`. Any function pointer type with up to twelve parameters implements
//! [`Signature`].
//!
//! Signatures with higher-ranked lifetimes such as `for<'x> fn(&'x str)` are
//! not supported. Name the lifetime instead, typically with a lifetime
//! parameter of the accepting function:
//!
//! ```
//! use fnview::FunctionView;
//!
//! fn longest<'s>(words: &[&'s str], score: FunctionView<'_, fn(&'s str) -> usize>) -> usize {
//!     words.iter().map(|&word| score.call(word)).max().unwrap_or(0)
//! }
//!
//! let len = |word: &str| word.len();
//! assert_eq!(longest(&["a", "abc", "ab"], FunctionView::new(&len)), 3);
//! ```
//!
//! ## Accepted Callables
//!
//! A callable is accepted if it can be called with the declared parameters
//! and its result is compatible with the declared result. The result is
//! compatible if it is the declared type, if it converts into it with
//! [`Into`], or if the declared result is `()`. Which of these applies is
//! chosen by the constructor:
//!
//! | Constructor                          | Callable                      | Result rule                    |
//! |--------------------------------------|-------------------------------|--------------------------------|
//! | [`FunctionView::new`]                | `&F` where `F: Fn(..)`        | identical or [`Into`]          |
//! | [`FunctionView::discarding`]         | `&F` where `F: Fn(..)`        | anything, declared result `()` |
//! | [`FunctionView::with_policy`]        | `&F` where `F: Fn(..)`        | any [`ReturnPolicy`]           |
//! | [`FunctionView::from_fn`]            | the exact signature type      | identical                      |
//! | [`FunctionView::from_fn_ptr`]        | any `fn(..)` pointer          | identical or [`Into`]          |
//! | [`FunctionView::from_fn_ptr_discarding`] | any `fn(..)` pointer      | anything, declared result `()` |
//!
//! Everything else is rejected at compile time. A callable with the wrong
//! number of parameters does not compile:
//!
//! ```compile_fail
//! use fnview::FunctionView;
//!
//! let add = |a: i32, b: i32| a + b;
//! let view = FunctionView::<fn(i32) -> i32>::new(&add);
//! ```
//!
//! Neither does a callable with incompatible parameter types:
//!
//! ```compile_fail
//! use fnview::FunctionView;
//!
//! let shout = |text: &'static str| text.len();
//! let view = FunctionView::<fn(u64) -> usize>::new(&shout);
//! ```
//!
//! Or one whose result cannot convert into the declared result:
//!
//! ```compile_fail
//! use fnview::FunctionView;
//!
//! let wide = |x: i64| x;
//! let view = FunctionView::<fn(i64) -> i32>::new(&wide);
//! ```
//!
//! Results are only dropped when asked for explicitly:
//!
//! ```compile_fail
//! use fnview::FunctionView;
//!
//! let len = |text: &'static str| text.len();
//! let view = FunctionView::<fn(&'static str)>::new(&len);
//! ```
//!
//! ```
//! use fnview::FunctionView;
//!
//! let len = |text: &'static str| text.len();
//! let view = FunctionView::<fn(&'static str)>::discarding(&len);
//! view.call("ignored");
//! ```
//!
//! ## Shared and Exclusive Views
//!
//! [`FunctionView`] binds a shared reference to an [`Fn`] callable and is
//! [`Copy`]. Every copy reaches the same callable, so state that several
//! copies update must use interior mutability such as [`Cell`].
//!
//! [`FunctionViewMut`] binds an exclusive reference to an [`FnMut`] callable.
//! It is not [`Copy`] and is called through `&mut self`; use
//! [`FunctionViewMut::reborrow`] to hand it to a nested call.
//!
//! ```
//! use fnview::FunctionViewMut;
//!
//! fn feed(mut sink: FunctionViewMut<'_, fn(u8)>, bytes: &[u8]) {
//!     for &byte in bytes {
//!         sink.call(byte);
//!     }
//! }
//!
//! let mut checksum = 0u32;
//! let mut add = |byte: u8| checksum += u32::from(byte);
//! feed(FunctionViewMut::new(&mut add), b"abc");
//! assert_eq!(checksum, 294);
//! ```
//!
//! ## Empty Views
//!
//! A view can also be empty, for optional callbacks. `call` and
//! [`FunctionView::invoke`] panic on an empty view,
//! [`FunctionView::try_invoke`] returns an [`EmptyViewError`] instead, and
//! the unsafe [`FunctionView::invoke_unchecked`] skips the check.
//!
//! ```
//! use fnview::{FunctionView, markers::Null};
//!
//! let mut on_progress: FunctionView<'_, fn(u8)> = Null.into();
//! assert!(on_progress == Null);
//! assert!(on_progress.try_invoke((50,)).is_err());
//!
//! let show = |percent: u8| assert!(percent <= 100);
//! on_progress = FunctionView::new(&show);
//! assert!(on_progress != Null);
//! on_progress.call(50);
//! ```
//!
//! ## Features
//!
//! - `tracing`: Emits [`tracing`](https://docs.rs/tracing) events with target
//!   `fnview` when a view is bound and when a checked invocation finds an
//!   empty view.
//!
//! For implementation details, see the [`fnview-internals`] crate.
//!
//! [`fnview-internals`]: fnview_internals
//! [`Cell`]: core::cell::Cell
//! [`ReturnPolicy`]: crate::policy::ReturnPolicy

#[macro_use]
mod macros;

mod error;
pub mod invoke;
pub mod markers;
pub mod policy;
pub mod prelude;
mod signature;
mod view;

pub use self::{
    error::EmptyViewError,
    signature::Signature,
    view::{FunctionView, FunctionViewMut},
};
