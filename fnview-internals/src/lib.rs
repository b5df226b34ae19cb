#![no_std]
#![forbid(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::missing_docs_in_private_items,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
#![allow(rustdoc::private_intra_doc_links)]
//! Internal implementation crate for [`fnview`].
//!
//! # Overview
//!
//! This crate contains the low-level, type-erased data structures and unsafe
//! operations that power the [`fnview`] callback library. It stores a
//! reference to an arbitrary callable in two machine words and dispatches
//! back to the concrete callable through a per-type trampoline, without heap
//! allocation and without trait objects.
//!
//! **This crate is an implementation detail.** No semantic versioning guarantees
//! are provided. Users should depend on the [`fnview`] crate, not this one.
//!
//! # Architecture
//!
//! - **[`view`]**: Type-erased callable references
//!   - [`RawFunctionView`]: The `(payload, trampoline)` pair
//!   - [`ErasedCallable`]: Union holding either an object address or a code
//!     address
//!   - [`Trampoline`]: Function pointer that restores the concrete callable
//!     from the payload and calls it
//!
//! - **[`invoke`]**: How a concrete callable is called with a tuple of
//!   arguments
//!   - [`InvokeRef`]: Callables invoked through a shared reference
//!   - [`InvokeMut`]: Callables invoked through a mutable reference
//!   - [`FnPointer`]: Plain function pointers, stored by value
//!
//! - **[`policy`]**: How the callable's own result becomes the declared
//!   result
//!   - [`Convert`]: Identity or [`Into`] conversion
//!   - [`Discard`]: Drops the result when nothing is declared
//!
//! # Safety Strategy
//!
//! The payload carries no tag saying which of its two interpretations is
//! active, and no record of the concrete callable type. Both facts are known
//! only to the trampoline that was created together with it.
//!
//! This crate maintains safety through:
//!
//! - **Module-based encapsulation**: The payload and trampoline are private
//!   fields of [`RawFunctionView`], and the only way to set them is through the
//!   `bind_*` constructors, which always pair a payload with the trampoline
//!   instantiated for the same type
//! - **Whole-pair updates**: A [`RawFunctionView`] is only ever replaced as a
//!   whole, so no half-bound state exists
//! - **Documented call contracts**: Each unsafe method specifies exactly which
//!   lifetime and aliasing obligations the caller takes over
//!
//! [`fnview`]: https://docs.rs/fnview/latest/fnview/
//! [`ErasedCallable`]: view::payload::ErasedCallable
//! [`Trampoline`]: view::trampoline::Trampoline
//! [`InvokeRef`]: invoke::InvokeRef
//! [`InvokeMut`]: invoke::InvokeMut
//! [`FnPointer`]: invoke::FnPointer
//! [`Convert`]: policy::Convert
//! [`Discard`]: policy::Discard

mod util;

pub mod invoke;
pub mod policy;
mod view;

pub use view::RawFunctionView;
