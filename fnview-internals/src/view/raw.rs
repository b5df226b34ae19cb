//! Type-erased callable reference.
//!
//! This module encapsulates the `callable` and `trampoline` fields of
//! [`RawFunctionView`], ensuring they are only visible within this module.
//! This visibility restriction guarantees the safety invariant: **the
//! trampoline, if present, was created for the exact callable type and
//! erasure strategy used to write the payload**.
//!
//! # Safety Invariant
//!
//! Both fields are written together by one of the `bind_*` constructors, by
//! [`RawFunctionView::empty`], or by [`RawFunctionView::clear`], and are never
//! written separately. A copy of a [`RawFunctionView`] copies both fields.
//!
//! What this type cannot guarantee is that the referenced callable is still
//! alive, or that it is not aliased in a way its erasure strategy forbids.
//! That is why invocation is `unsafe`; the typed wrappers in the `fnview`
//! crate discharge those obligations with lifetimes and borrows.

use crate::{
    invoke::{FnPointer, InvokeMut, InvokeRef},
    policy::ReturnPolicy,
    view::{payload::ErasedCallable, trampoline::Trampoline},
};

/// A non-owning, type-erased reference to a callable taking the argument
/// tuple `Args` and returning `R`, or nothing.
///
/// The view is the pair of an [`ErasedCallable`] payload and a
/// [`Trampoline`]. It is two machine words regardless of `Args`, `R` and the
/// concrete callable type, and it never allocates.
///
/// A view without a trampoline is empty. Invoking an empty view through
/// [`RawFunctionView::invoke`] returns [`None`]; invoking it through
/// [`RawFunctionView::invoke_unchecked`] is undefined behavior.
pub struct RawFunctionView<Args, R> {
    /// Erased address of the bound callable
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. If `trampoline` is `Some`, this payload was written by the
    ///    `ErasedCallable` constructor matching the trampoline, for the same
    ///    callable type.
    /// 2. If `trampoline` is `None`, this payload is never read.
    callable: ErasedCallable,

    /// Dispatch function restoring and calling the bound callable, or `None`
    /// for an empty view
    trampoline: Option<Trampoline<Args, R>>,
}

impl<Args, R> Clone for RawFunctionView<Args, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Args, R> Copy for RawFunctionView<Args, R> {}

impl<Args, R> Default for RawFunctionView<Args, R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<Args, R> core::fmt::Debug for RawFunctionView<Args, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RawFunctionView")
            .field("bound", &self.is_bound())
            .finish()
    }
}

impl<Args, R> RawFunctionView<Args, R> {
    /// Creates an empty [`RawFunctionView`].
    #[inline]
    pub const fn empty() -> Self {
        Self {
            callable: ErasedCallable::NULL,
            trampoline: None,
        }
    }

    /// Binds a callable invoked through a shared reference.
    ///
    /// The view stores the address of `callable`; the callable itself is not
    /// copied. The result of the callable is converted with the policy `P`.
    #[inline]
    pub fn bind_ref<F, P>(callable: &F) -> Self
    where
        F: InvokeRef<Args>,
        P: ReturnPolicy<F::Output, R>,
    {
        Self {
            callable: ErasedCallable::from_ref(callable),
            trampoline: Some(Trampoline::for_ref::<F, P>()),
        }
    }

    /// Binds a callable invoked through a mutable reference.
    ///
    /// The view stores the address of `callable`; the callable itself is not
    /// copied. The result of the callable is converted with the policy `P`.
    #[inline]
    pub fn bind_mut<F, P>(callable: &mut F) -> Self
    where
        F: InvokeMut<Args>,
        P: ReturnPolicy<F::Output, R>,
    {
        Self {
            callable: ErasedCallable::from_mut(callable),
            trampoline: Some(Trampoline::for_mut::<F, P>()),
        }
    }

    /// Binds a plain function pointer.
    ///
    /// The code address is stored directly in the view, so invocation does
    /// not go through an object address first. The result of the function is
    /// converted with the policy `P`.
    #[inline]
    pub fn bind_fn_pointer<Fp, P>(function: Fp) -> Self
    where
        Fp: FnPointer<Args>,
        P: ReturnPolicy<Fp::Output, R>,
    {
        Self {
            callable: ErasedCallable::from_code(function.into_code()),
            trampoline: Some(Trampoline::for_fn_pointer::<Fp, P>()),
        }
    }

    /// Returns `true` if the view is bound to a callable.
    ///
    /// Only the trampoline is inspected, since the payload does not say which
    /// of its fields is active.
    #[inline]
    pub fn is_bound(&self) -> bool {
        self.trampoline.is_some()
    }

    /// Resets the view to the empty state.
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::empty();
    }

    /// Invokes the bound callable, or returns [`None`] if the view is empty.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The callable the view was bound to is still alive and has not been
    ///    moved.
    /// 2. If the view was bound with [`RawFunctionView::bind_ref`], no mutable
    ///    reference to the callable is live during the call.
    /// 3. If the view was bound with [`RawFunctionView::bind_mut`], no other
    ///    reference to the callable is live during the call, including one
    ///    held by a concurrent or re-entrant invocation of a copy of this
    ///    view.
    #[inline]
    pub unsafe fn invoke(&self, args: Args) -> Option<R> {
        let trampoline = self.trampoline?;

        // SAFETY:
        // 1. The payload was written together with `trampoline` for the same callable
        //    type, as guaranteed by the invariants on this type.
        // 2. The lifetime and aliasing obligations are guaranteed by the caller.
        let result = unsafe { trampoline.call(self.callable, args) };
        Some(result)
    }

    /// Invokes the bound callable without checking that the view is bound.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The view is bound, i.e. [`RawFunctionView::is_bound`] returns
    ///    `true`.
    /// 2. The obligations of [`RawFunctionView::invoke`] hold.
    #[inline]
    pub unsafe fn invoke_unchecked(&self, args: Args) -> R {
        // Debug assertion to catch calls on empty views in case of bugs
        debug_assert!(self.is_bound(), "invoked an empty RawFunctionView");

        // SAFETY:
        // 1. The view is bound, as guaranteed by the caller
        let trampoline = unsafe { self.trampoline.unwrap_unchecked() };

        // SAFETY:
        // 1. The payload was written together with `trampoline` for the same callable
        //    type, as guaranteed by the invariants on this type.
        // 2. The lifetime and aliasing obligations are guaranteed by the caller.
        unsafe { trampoline.call(self.callable, args) }
    }
}
