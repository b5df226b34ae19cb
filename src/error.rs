/// Error returned when a checked invocation finds an empty view.
///
/// Returned by [`FunctionView::try_invoke`] and
/// [`FunctionViewMut::try_invoke`]. Its message is also the panic message of
/// `invoke` and `call` on an empty view.
///
/// # Examples
///
/// ```
/// use fnview::{EmptyViewError, FunctionView};
///
/// let view = FunctionView::<fn() -> u8>::empty();
/// let error: EmptyViewError = view.try_invoke(()).unwrap_err();
/// assert_eq!(error.to_string(), "called an empty function view");
/// ```
///
/// [`FunctionView::try_invoke`]: crate::FunctionView::try_invoke
/// [`FunctionViewMut::try_invoke`]: crate::FunctionViewMut::try_invoke
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Hash, thiserror::Error)]
#[error("called an empty function view")]
pub struct EmptyViewError;
