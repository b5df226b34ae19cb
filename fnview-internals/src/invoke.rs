//! Traits describing how a concrete callable is called with a tuple of
//! arguments.
//!
//! A function view stores its arguments as one tuple `Args` so that a single
//! trampoline type `unsafe fn(ErasedCallable, Args) -> R` covers every arity.
//! The traits in this module unpack that tuple again for a concrete callable.
//!
//! All three traits are implemented for arities 0 through 12:
//!
//! - [`InvokeRef`] for every `F: Fn(A1, .., An) -> R`
//! - [`InvokeMut`] for every `F: FnMut(A1, .., An) -> R`
//! - [`FnPointer`] for every function pointer `fn(A1, .., An) -> R`
//!
//! [`InvokeRef`] and [`InvokeMut`] may also be implemented by hand. Stable Rust
//! does not allow implementing the `Fn*` traits for a user-defined type, so
//! implementing one of these traits is how a struct acts as a function object.

use crate::util::for_each_arity;

/// A callable that can be invoked through a shared reference with the
/// argument tuple `Args`.
///
/// # Examples
///
/// ```
/// use core::cell::Cell;
///
/// use fnview_internals::invoke::InvokeRef;
///
/// // A function object counting how often it was called
/// struct Counter<'a> {
///     hits: &'a Cell<u32>,
/// }
///
/// impl InvokeRef<()> for Counter<'_> {
///     type Output = ();
///
///     fn invoke_ref(&self, (): ()) {
///         self.hits.set(self.hits.get() + 1);
///     }
/// }
///
/// let hits = Cell::new(0);
/// let counter = Counter { hits: &hits };
/// counter.invoke_ref(());
/// assert_eq!(hits.get(), 1);
///
/// // Closures implement the trait automatically
/// let add = |a: i32, b: i32| a + b;
/// assert_eq!(add.invoke_ref((2, 3)), 5);
/// ```
pub trait InvokeRef<Args> {
    /// The result of the call, before any conversion to the declared result.
    type Output;

    /// Calls `self` with the unpacked arguments.
    fn invoke_ref(&self, args: Args) -> Self::Output;
}

/// A callable that can be invoked through a mutable reference with the
/// argument tuple `Args`.
///
/// # Examples
///
/// ```
/// use fnview_internals::invoke::InvokeMut;
///
/// let mut total = 0;
/// let mut accumulate = |x: i32| {
///     total += x;
///     total
/// };
/// assert_eq!(accumulate.invoke_mut((4,)), 4);
/// assert_eq!(accumulate.invoke_mut((6,)), 10);
/// ```
pub trait InvokeMut<Args> {
    /// The result of the call, before any conversion to the declared result.
    type Output;

    /// Calls `self` with the unpacked arguments.
    fn invoke_mut(&mut self, args: Args) -> Self::Output;
}

/// A plain function pointer taking the argument tuple `Args`.
///
/// A function pointer is bound by value: its code address is stored directly
/// in the view, saving the indirection through an object address.
///
/// This trait is sealed. Only the function pointer types `fn(A1, .., An) -> R`
/// implement it, because the view relies on [`FnPointer::from_code`] undoing
/// [`FnPointer::into_code`] exactly.
pub trait FnPointer<Args>: Copy + private::Sealed {
    /// The result of the call, before any conversion to the declared result.
    type Output;

    /// Calls the function with the unpacked arguments.
    fn invoke_fn_pointer(self, args: Args) -> Self::Output;

    /// Converts the function pointer to the canonical code address type.
    ///
    /// The returned pointer must not be called; it is only meant to be turned
    /// back into `Self` by [`FnPointer::from_code`].
    fn into_code(self) -> unsafe fn();

    /// Restores a function pointer from a canonical code address.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `code` was returned by [`FnPointer::into_code`] on a value of type
    ///    `Self`.
    unsafe fn from_code(code: unsafe fn()) -> Self;
}

/// Sealing module for [`FnPointer`].
mod private {
    /// Supertrait preventing implementations of [`FnPointer`] outside this
    /// crate.
    ///
    /// [`FnPointer`]: super::FnPointer
    pub trait Sealed {}
}

/// Implements [`InvokeRef`], [`InvokeMut`] and [`FnPointer`] for one arity.
macro_rules! impl_invoke {
    ($($arg:ident: $ty:ident),*) => {
        impl<F, R, $($ty),*> InvokeRef<($($ty,)*)> for F
        where
            F: Fn($($ty),*) -> R,
        {
            type Output = R;

            #[inline]
            fn invoke_ref(&self, ($($arg,)*): ($($ty,)*)) -> R {
                self($($arg),*)
            }
        }

        impl<F, R, $($ty),*> InvokeMut<($($ty,)*)> for F
        where
            F: FnMut($($ty),*) -> R,
        {
            type Output = R;

            #[inline]
            fn invoke_mut(&mut self, ($($arg,)*): ($($ty,)*)) -> R {
                self($($arg),*)
            }
        }

        impl<R, $($ty),*> private::Sealed for fn($($ty),*) -> R {}

        impl<R, $($ty),*> FnPointer<($($ty,)*)> for fn($($ty),*) -> R {
            type Output = R;

            #[inline]
            fn invoke_fn_pointer(self, ($($arg,)*): ($($ty,)*)) -> R {
                self($($arg),*)
            }

            #[inline]
            fn into_code(self) -> unsafe fn() {
                // SAFETY: All function pointers have the same size and representation.
                // The result is never called as `unsafe fn()`; it is only transmuted
                // back to `Self` in `from_code`.
                unsafe { core::mem::transmute::<Self, unsafe fn()>(self) }
            }

            #[inline]
            unsafe fn from_code(code: unsafe fn()) -> Self {
                // SAFETY: The caller guarantees that `code` was produced by `into_code`
                // on a `Self`, so this restores the original function pointer.
                unsafe { core::mem::transmute::<unsafe fn(), Self>(code) }
            }
        }
    };
}

for_each_arity!(impl_invoke);
