//! Policies turning a callable's own result into the declared result of a
//! view.
//!
//! The built-in constructors pick a policy for you:
//!
//! - [`Convert`] accepts a result that is the declared type or converts into
//!   it with [`Into`]. Used by `new` and the `from_fn*` constructors.
//! - [`Discard`] accepts any result when the declared result is `()`, and
//!   drops it. Used by the `*discarding` constructors.
//!
//! Any other conversion can be expressed as a [`ReturnPolicy`] and passed to
//! `with_policy`:
//!
//! ```
//! use fnview::{FunctionView, policy::ReturnPolicy};
//!
//! struct Saturate;
//!
//! impl ReturnPolicy<u64, u8> for Saturate {
//!     fn convert(value: u64) -> u8 {
//!         u8::try_from(value).unwrap_or(u8::MAX)
//!     }
//! }
//!
//! let square = |x: u64| x * x;
//! let view = FunctionView::<fn(u64) -> u8>::with_policy::<Saturate, _>(&square);
//! assert_eq!(view.call(3), 9);
//! assert_eq!(view.call(300), u8::MAX);
//! ```

pub use fnview_internals::policy::{Convert, Discard, ReturnPolicy};
