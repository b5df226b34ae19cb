//! Commonly used items for convenient importing.
//!
//! # Usage
//!
//! ```rust
//! use fnview::prelude::*;
//!
//! fn apply_twice(f: FunctionView<'_, fn(i32) -> i32>, x: i32) -> i32 {
//!     f.call(f.call(x))
//! }
//!
//! let step = 3;
//! let add_step = |x: i32| x + step;
//! assert_eq!(apply_twice(FunctionView::new(&add_step), 1), 7);
//! ```
//!
//! # What's Included
//!
//! - **[`FunctionView`]** and **[`FunctionViewMut`]**: The view types
//! - **[`Signature`]**: The trait naming a view's parameters and result
//! - **[`InvokeRef`]** and **[`InvokeMut`]**: For implementing function
//!   objects
//! - **[`Null`]**: The empty-view marker

pub use crate::{
    FunctionView, FunctionViewMut, Signature,
    invoke::{InvokeMut, InvokeRef},
    markers::Null,
};
