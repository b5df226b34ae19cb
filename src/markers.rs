//! Marker types used when constructing and comparing function views.
//!
//! # Examples
//!
//! ```
//! use fnview::{FunctionView, FunctionViewMut, markers::Null};
//!
//! // Both view kinds can be created from, and compared against, `Null`
//! let view: FunctionView<'_, fn(i32) -> i32> = FunctionView::from(Null);
//! let view_mut: FunctionViewMut<'_, fn(i32) -> i32> = Null.into();
//!
//! assert!(view == Null);
//! assert!(Null == view_mut);
//! ```

/// The null callable: converts into an empty view, and compares equal to
/// exactly the empty views.
///
/// `Null` carries no data. Comparing a view against it is the same as calling
/// [`FunctionView::is_empty`].
///
/// # Examples
///
/// ```
/// use fnview::{FunctionView, markers::Null};
///
/// let double = |x: u32| x * 2;
/// let mut view = FunctionView::<fn(u32) -> u32>::new(&double);
/// assert!(view != Null);
///
/// view = Null.into();
/// assert!(view.is_empty());
/// ```
///
/// [`FunctionView::is_empty`]: crate::FunctionView::is_empty
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct Null;
