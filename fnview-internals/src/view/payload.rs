//! This module encapsulates the fields of the [`ErasedCallable`]. Since this is
//! the only place they are visible, the only way to write the union is through
//! the typed constructors below, and the only way to read it is through the
//! unsafe accessors, whose contracts require that the reader knows which
//! constructor was used and with which type.
//!
//! The union does not record which field is active. A [`Trampoline`] created
//! together with the payload carries that knowledge instead.
//!
//! [`Trampoline`]: crate::view::trampoline::Trampoline

use core::ptr;

use crate::util::Erased;

/// Storage for an erased callable: either the address of a callable object or
/// the address of a function.
///
/// A function pointer is kept in its own field rather than cast to an object
/// address, because converting between code and data addresses is not
/// portable, while converting between function pointer types is.
///
/// The size of this union is the larger of one object address and one code
/// address.
#[derive(Clone, Copy)]
pub(crate) union ErasedCallable {
    /// Address of a callable object. Written by [`ErasedCallable::from_ref`]
    /// and [`ErasedCallable::from_mut`].
    data: *const Erased,
    /// Address of a function. Written by [`ErasedCallable::from_code`].
    code: unsafe fn(),
}

impl ErasedCallable {
    /// Payload of an empty view. It is never read, because an empty view has
    /// no trampoline.
    pub(crate) const NULL: Self = Self { data: ptr::null() };

    /// Erases the address of a callable object borrowed immutably.
    #[inline]
    pub(crate) fn from_ref<F>(callable: &F) -> Self {
        Self {
            data: ptr::from_ref(callable).cast::<Erased>(),
        }
    }

    /// Erases the address of a callable object borrowed mutably.
    ///
    /// The address keeps the write provenance of the `&mut F`, so it can later
    /// be restored with [`ErasedCallable::as_mut`].
    #[inline]
    pub(crate) fn from_mut<F>(callable: &mut F) -> Self {
        Self {
            data: ptr::from_mut(callable).cast_const().cast::<Erased>(),
        }
    }

    /// Stores a canonical code address.
    #[inline]
    pub(crate) const fn from_code(code: unsafe fn()) -> Self {
        Self { code }
    }

    /// Restores a shared reference to the callable object.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The payload was created by [`ErasedCallable::from_ref::<F>`] or
    ///    [`ErasedCallable::from_mut::<F>`] with this exact `F`.
    /// 2. The callable is still alive for `'a` and has not been moved.
    /// 3. No mutable reference to the callable is live during `'a`.
    ///
    /// [`ErasedCallable::from_ref::<F>`]: ErasedCallable::from_ref
    /// [`ErasedCallable::from_mut::<F>`]: ErasedCallable::from_mut
    #[inline]
    pub(crate) unsafe fn as_ref<'a, F>(self) -> &'a F {
        // SAFETY: The `data` field is the active one, since the payload was created
        // by `from_ref` or `from_mut` (guaranteed by the caller).
        let data = unsafe { self.data };
        let data = data.cast::<F>();

        // SAFETY: Converting the pointer to a reference is sound because:
        // - The pointer came from a valid `&F` or `&mut F`, so it is non-null and
        //   properly aligned (guaranteed by the caller)
        // - The pointee is alive and unmoved for `'a` (guaranteed by the caller)
        // - No mutable reference is live during `'a` (guaranteed by the caller)
        unsafe { &*data }
    }

    /// Restores a mutable reference to the callable object.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The payload was created by [`ErasedCallable::from_mut::<F>`] with
    ///    this exact `F`.
    /// 2. The callable is still alive for `'a` and has not been moved.
    /// 3. No other reference to the callable is live during `'a`.
    ///
    /// [`ErasedCallable::from_mut::<F>`]: ErasedCallable::from_mut
    #[inline]
    pub(crate) unsafe fn as_mut<'a, F>(self) -> &'a mut F {
        // SAFETY: The `data` field is the active one, since the payload was created
        // by `from_mut` (guaranteed by the caller).
        let data = unsafe { self.data };
        let data = data.cast::<F>().cast_mut();

        // SAFETY: Converting the pointer to a mutable reference is sound because:
        // - The pointer came from a valid `&mut F`, so it is non-null, properly
        //   aligned and carries write provenance (guaranteed by the caller)
        // - The pointee is alive and unmoved for `'a` (guaranteed by the caller)
        // - No other reference is live during `'a` (guaranteed by the caller)
        unsafe { &mut *data }
    }

    /// Reads the stored code address.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The payload was created by [`ErasedCallable::from_code`].
    #[inline]
    pub(crate) unsafe fn code(self) -> unsafe fn() {
        // SAFETY: The `code` field is the active one (guaranteed by the caller).
        unsafe { self.code }
    }
}
