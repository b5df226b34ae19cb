/// The signature of a function view, named by a function pointer type.
///
/// `fn(A1, .., An) -> R` describes a view taking the parameters `A1` through
/// `An` and returning `R`. The parameters are gathered into the tuple
/// [`Signature::Args`], which is what the generic [`FunctionView::invoke`]
/// takes; the per-arity `call` methods take them one by one.
///
/// This trait is sealed and implemented for function pointer types with up to
/// twelve parameters. Higher-ranked function pointer types such as
/// `for<'x> fn(&'x str)` do not implement it.
///
/// # Examples
///
/// ```
/// use fnview::Signature;
///
/// fn arguments<S: Signature>(_: S::Args) {}
///
/// arguments::<fn(u8, char) -> bool>((1, 'x'));
/// arguments::<fn()>(());
/// ```
///
/// [`FunctionView::invoke`]: crate::FunctionView::invoke
pub trait Signature: private::Sealed {
    /// The parameters of the signature, as a tuple.
    type Args;

    /// The declared result of the signature.
    type Return;
}

/// Sealing module for [`Signature`].
mod private {
    /// Prevents implementations of [`Signature`] outside this crate.
    ///
    /// [`Signature`]: super::Signature
    pub trait Sealed {}
}

/// Implements [`Signature`] for the function pointer type of one arity.
macro_rules! impl_signature {
    ($($arg:ident: $ty:ident),*) => {
        impl<R, $($ty),*> private::Sealed for fn($($ty),*) -> R {}

        impl<R, $($ty),*> Signature for fn($($ty),*) -> R {
            type Args = ($($ty,)*);
            type Return = R;
        }
    };
}

for_each_arity!(impl_signature);
