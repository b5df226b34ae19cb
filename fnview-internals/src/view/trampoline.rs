//! Trampolines for type-erased callable invocation.
//!
//! This module contains the [`Trampoline`], the single-entry dispatch table of
//! a function view. It wraps a function pointer that knows the concrete type
//! erased into an [`ErasedCallable`] and restores it before calling.
//!
//! This module encapsulates the field of [`Trampoline`] so it cannot be
//! accessed directly. This visibility restriction guarantees the safety
//! invariant: **the trampoline's function is always one of the functions
//! defined below, instantiated with the callable type, argument tuple, result
//! and return policy that were used to create it**.
//!
//! # Safety Invariant
//!
//! The invariant is maintained because trampolines are only created through
//! [`Trampoline::for_ref`], [`Trampoline::for_mut`] and
//! [`Trampoline::for_fn_pointer`], which pair the function pointer with its
//! type parameters at compile time. One function is generated per distinct
//! combination of those types; no state is captured.

use crate::{
    invoke::{FnPointer, InvokeMut, InvokeRef},
    policy::ReturnPolicy,
    view::payload::ErasedCallable,
};

/// Typed dispatch function for a view with argument tuple `Args` and declared
/// result `R`.
///
/// # Safety Invariant
///
/// The field `call` is guaranteed to point to one of [`call_ref`],
/// [`call_mut`] or [`call_fn_pointer`], instantiated with the types that were
/// used to create this [`Trampoline`].
pub(crate) struct Trampoline<Args, R> {
    /// Restores the callable from the payload, calls it with the arguments
    /// and converts the result.
    call: unsafe fn(ErasedCallable, Args) -> R,
}

impl<Args, R> Clone for Trampoline<Args, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Args, R> Copy for Trampoline<Args, R> {}

impl<Args, R> Trampoline<Args, R> {
    /// Creates a [`Trampoline`] for a callable of type `F` erased with
    /// [`ErasedCallable::from_ref`] and converted with the policy `P`.
    #[inline]
    pub(super) fn for_ref<F, P>() -> Self
    where
        F: InvokeRef<Args>,
        P: ReturnPolicy<F::Output, R>,
    {
        Self {
            call: call_ref::<F, Args, R, P>,
        }
    }

    /// Creates a [`Trampoline`] for a callable of type `F` erased with
    /// [`ErasedCallable::from_mut`] and converted with the policy `P`.
    #[inline]
    pub(super) fn for_mut<F, P>() -> Self
    where
        F: InvokeMut<Args>,
        P: ReturnPolicy<F::Output, R>,
    {
        Self {
            call: call_mut::<F, Args, R, P>,
        }
    }

    /// Creates a [`Trampoline`] for a function pointer of type `Fp` erased
    /// with [`ErasedCallable::from_code`] and converted with the policy `P`.
    #[inline]
    pub(super) fn for_fn_pointer<Fp, P>() -> Self
    where
        Fp: FnPointer<Args>,
        P: ReturnPolicy<Fp::Output, R>,
    {
        Self {
            call: call_fn_pointer::<Fp, Args, R, P>,
        }
    }

    /// Calls the callable erased in `callable` with `args`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `callable` was created together with this [`Trampoline`], by the
    ///    matching `ErasedCallable` constructor and with the same callable
    ///    type.
    /// 2. The obligations of the matching `ErasedCallable` accessor hold for
    ///    the duration of the call: [`ErasedCallable::as_ref`] for
    ///    [`Trampoline::for_ref`], [`ErasedCallable::as_mut`] for
    ///    [`Trampoline::for_mut`].
    #[inline]
    pub(super) unsafe fn call(self, callable: ErasedCallable, args: Args) -> R {
        // SAFETY: We know that `self.call` points to one of the functions below,
        // instantiated for the callable stored in `callable`. Their safety
        // requirements are upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        unsafe { (self.call)(callable, args) }
    }
}

/// Restores a `&F` from the payload and calls it.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The payload was created by [`ErasedCallable::from_ref::<F>`] or
///    [`ErasedCallable::from_mut::<F>`].
/// 2. The callable is alive and not mutably borrowed for the duration of the
///    call.
///
/// [`ErasedCallable::from_ref::<F>`]: ErasedCallable::from_ref
/// [`ErasedCallable::from_mut::<F>`]: ErasedCallable::from_mut
unsafe fn call_ref<F, Args, R, P>(callable: ErasedCallable, args: Args) -> R
where
    F: InvokeRef<Args>,
    P: ReturnPolicy<F::Output, R>,
{
    // SAFETY:
    // 1. Guaranteed by the caller
    // 2. Guaranteed by the caller
    let callable: &F = unsafe { callable.as_ref::<F>() };
    P::convert(callable.invoke_ref(args))
}

/// Restores a `&mut F` from the payload and calls it.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The payload was created by [`ErasedCallable::from_mut::<F>`].
/// 2. The callable is alive and not otherwise borrowed for the duration of the
///    call.
///
/// [`ErasedCallable::from_mut::<F>`]: ErasedCallable::from_mut
unsafe fn call_mut<F, Args, R, P>(callable: ErasedCallable, args: Args) -> R
where
    F: InvokeMut<Args>,
    P: ReturnPolicy<F::Output, R>,
{
    // SAFETY:
    // 1. Guaranteed by the caller
    // 2. Guaranteed by the caller
    let callable: &mut F = unsafe { callable.as_mut::<F>() };
    P::convert(callable.invoke_mut(args))
}

/// Restores a function pointer of type `Fp` from the payload and calls it.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The payload was created by [`ErasedCallable::from_code`] from the result
///    of [`FnPointer::into_code`] on an `Fp`.
unsafe fn call_fn_pointer<Fp, Args, R, P>(callable: ErasedCallable, args: Args) -> R
where
    Fp: FnPointer<Args>,
    P: ReturnPolicy<Fp::Output, R>,
{
    // SAFETY:
    // 1. The payload was created by `from_code` (guaranteed by the caller)
    let code = unsafe { callable.code() };

    // SAFETY:
    // 1. `code` came from `Fp::into_code` (guaranteed by the caller)
    let function = unsafe { Fp::from_code(code) };
    P::convert(function.invoke_fn_pointer(args))
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;
    use crate::policy::{Convert, Discard};

    fn square(x: i32) -> i32 {
        x * x
    }

    #[test]
    fn test_trampoline_size() {
        assert_eq!(
            core::mem::size_of::<Trampoline<(i32,), bool>>(),
            core::mem::size_of::<usize>()
        );
        assert_eq!(
            core::mem::size_of::<Option<Trampoline<(i32,), bool>>>(),
            core::mem::size_of::<usize>()
        );
    }

    #[test]
    fn test_trampoline_for_ref() {
        let offset = 10;
        let add = |x: i32| x + offset;
        let trampoline = make_widening_trampoline(&add);
        let payload = ErasedCallable::from_ref(&add);

        // SAFETY: `payload` was created by `from_ref` for the closure type the
        // trampoline was instantiated with, and `add` is alive and only shared.
        let result = unsafe { trampoline.call(payload, (5,)) };
        assert_eq!(result, 15i64);
    }

    // Names the closure type so the trampoline can be instantiated for it.
    fn make_widening_trampoline<F>(_: &F) -> Trampoline<(i32,), i64>
    where
        F: InvokeRef<(i32,), Output = i32>,
    {
        Trampoline::for_ref::<F, Convert>()
    }

    #[test]
    fn test_trampoline_for_mut() {
        let mut seen = 0;
        let mut record = |x: i32| {
            seen += x;
            seen
        };
        let trampoline = make_mut_trampoline(&record);
        let payload = ErasedCallable::from_mut(&mut record);

        // SAFETY: `payload` was created by `from_mut` for the closure type the
        // trampoline was instantiated with, and no other reference to `record`
        // is used during the calls.
        let first = unsafe { trampoline.call(payload, (2,)) };
        // SAFETY: Same as above.
        let second = unsafe { trampoline.call(payload, (3,)) };
        assert_eq!((first, second), (2, 5));
    }

    // Names the closure type so the trampoline can be instantiated for it.
    fn make_mut_trampoline<F>(_: &F) -> Trampoline<(i32,), i32>
    where
        F: InvokeMut<(i32,), Output = i32>,
    {
        Trampoline::for_mut::<F, Convert>()
    }

    #[test]
    fn test_trampoline_for_fn_pointer() {
        let function: fn(i32) -> i32 = square;
        let trampoline = Trampoline::<(i32,), i32>::for_fn_pointer::<fn(i32) -> i32, Convert>();
        let payload = ErasedCallable::from_code(function.into_code());

        // SAFETY: `payload` holds the code address of a `fn(i32) -> i32`, which is
        // the type the trampoline was instantiated with.
        let result = unsafe { trampoline.call(payload, (9,)) };
        assert_eq!(result, 81);
    }

    #[test]
    fn test_trampoline_discards_result() {
        let calls = Cell::new(0);
        let count = || {
            calls.set(calls.get() + 1);
            calls.get()
        };
        let payload = ErasedCallable::from_ref(&count);
        let trampoline = make_discarding_trampoline(&count);

        // SAFETY: `payload` was created by `from_ref` for the closure type the
        // trampoline was instantiated with, and `count` is alive and only shared.
        unsafe { trampoline.call(payload, ()) };
        assert_eq!(calls.get(), 1);
    }

    // Names the closure type so the trampoline can be instantiated for it.
    fn make_discarding_trampoline<F>(_: &F) -> Trampoline<(), ()>
    where
        F: InvokeRef<()>,
    {
        Trampoline::for_ref::<F, Discard>()
    }
}
