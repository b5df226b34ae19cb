//! Policies that turn a callable's own result into the result declared by a
//! function view.
//!
//! A callable with result `Returned` is compatible with a view declaring
//! `Declared` if any one of these holds:
//!
//! - `Declared` is `()`, in which case the result is discarded
//! - `Returned` is exactly `Declared`
//! - `Returned` converts into `Declared`
//!
//! Each alternative is a separate witness type implementing [`ReturnPolicy`].
//! The binder picks the witness explicitly, so the choice never depends on
//! overlapping trait implementations.

/// Converts the result of a bound callable into the declared result of the
/// view it is bound to.
///
/// The policy is a type-level strategy. It is chosen when a view is bound and
/// baked into the trampoline; no instance of it is ever stored.
///
/// # Examples
///
/// A saturating conversion from `i64` down to `i32`:
///
/// ```
/// use fnview_internals::policy::ReturnPolicy;
///
/// struct Saturate;
///
/// impl ReturnPolicy<i64, i32> for Saturate {
///     fn convert(value: i64) -> i32 {
///         value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
///     }
/// }
///
/// assert_eq!(Saturate::convert(1 << 40), i32::MAX);
/// assert_eq!(Saturate::convert(-3), -3);
/// ```
pub trait ReturnPolicy<Returned, Declared>: 'static {
    /// Converts the callable's result into the declared result.
    fn convert(value: Returned) -> Declared;
}

/// Policy accepting results that are identical to, or convert into, the
/// declared result.
///
/// Identity is covered by the reflexive `impl<T> From<T> for T` in core.
///
/// # Examples
///
/// ```
/// use fnview_internals::policy::{Convert, ReturnPolicy};
///
/// let widened: i64 = <Convert as ReturnPolicy<i32, i64>>::convert(7);
/// assert_eq!(widened, 7);
///
/// let same: u8 = <Convert as ReturnPolicy<u8, u8>>::convert(3);
/// assert_eq!(same, 3);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct Convert;

impl<Returned, Declared> ReturnPolicy<Returned, Declared> for Convert
where
    Returned: Into<Declared>,
{
    #[inline]
    fn convert(value: Returned) -> Declared {
        value.into()
    }
}

/// Policy accepting any result when the declared result is `()`.
///
/// The callable's result is dropped right after the call returns.
///
/// # Examples
///
/// ```
/// use fnview_internals::policy::{Discard, ReturnPolicy};
///
/// <Discard as ReturnPolicy<&str, ()>>::convert("ignored");
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct Discard;

impl<Returned> ReturnPolicy<Returned, ()> for Discard {
    #[inline]
    fn convert(value: Returned) {
        core::mem::drop(value);
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;

    struct DropFlag<'a>(&'a Cell<bool>);

    impl Drop for DropFlag<'_> {
        fn drop(&mut self) {
            self.0.set(true);
        }
    }

    #[test]
    fn test_convert_identity_and_into() {
        assert!(<Convert as ReturnPolicy<bool, bool>>::convert(true));
        assert_eq!(<Convert as ReturnPolicy<u16, u64>>::convert(40_000), 40_000u64);
        assert_eq!(<Convert as ReturnPolicy<char, u32>>::convert('a'), 97);
    }

    #[test]
    fn test_discard_drops_result() {
        let dropped = Cell::new(false);
        <Discard as ReturnPolicy<DropFlag<'_>, ()>>::convert(DropFlag(&dropped));
        assert!(dropped.get());
    }

    #[test]
    fn test_policies_are_zero_sized() {
        assert_eq!(core::mem::size_of::<Convert>(), 0);
        assert_eq!(core::mem::size_of::<Discard>(), 0);
    }
}
