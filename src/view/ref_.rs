use core::{fmt, marker::PhantomData};

use fnview_internals::{
    RawFunctionView,
    invoke::{FnPointer, InvokeRef},
    policy::{Convert, Discard, ReturnPolicy},
};

use crate::{EmptyViewError, Signature, markers::Null};

/// A non-owning, copyable reference to a callable with the signature `S`.
///
/// The view stores the address of the callable and a trampoline that knows
/// its concrete type, in two machine words. It borrows the callable for `'a`
/// and never copies it: every copy of a view reaches the same callable.
///
/// See the [crate documentation](crate) for an overview of the constructors
/// and the rules deciding which callables are accepted.
///
/// # Examples
///
/// ```
/// use core::cell::Cell;
///
/// use fnview::FunctionView;
///
/// fn repeat(times: usize, action: FunctionView<'_, fn()>) {
///     for _ in 0..times {
///         action.call();
///     }
/// }
///
/// let counter = Cell::new(0);
/// let increment = || counter.set(counter.get() + 1);
/// repeat(3, FunctionView::new(&increment));
/// assert_eq!(counter.get(), 3);
/// ```
#[repr(transparent)]
pub struct FunctionView<'a, S>
where
    S: Signature,
{
    raw: RawFunctionView<S::Args, S::Return>,
    _callable: PhantomData<&'a ()>,
    _signature: PhantomData<S>,
}

impl<'a, S> Copy for FunctionView<'a, S> where S: Signature {}
impl<'a, S> Clone for FunctionView<'a, S>
where
    S: Signature,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, S> FunctionView<'a, S>
where
    S: Signature,
{
    /// Creates a view from a raw view.
    ///
    /// # Safety
    ///
    /// To call this method you must ensure the following:
    ///
    /// - If `raw` is bound to a callable object, it was bound with
    ///   [`RawFunctionView::bind_ref`] and the object stays borrowed immutably
    ///   for `'a`.
    const unsafe fn from_raw(raw: RawFunctionView<S::Args, S::Return>) -> Self {
        Self {
            raw,
            _callable: PhantomData,
            _signature: PhantomData,
        }
    }

    pub(crate) fn into_raw(self) -> RawFunctionView<S::Args, S::Return> {
        self.raw
    }

    /// Creates an empty view.
    ///
    /// # Examples
    /// ```
    /// use fnview::FunctionView;
    ///
    /// let view = FunctionView::<fn(u8) -> u8>::empty();
    /// assert!(view.is_empty());
    /// ```
    #[inline]
    pub const fn empty() -> Self {
        // SAFETY:
        // 1. The view is empty, so it is not bound to any object.
        unsafe { Self::from_raw(RawFunctionView::empty()) }
    }

    /// Creates a view of `callable`, converting its result with [`Into`].
    ///
    /// A result of the declared type is accepted as is, through the reflexive
    /// `impl<T> From<T> for T`.
    ///
    /// A signature without a result does not accept a callable that returns
    /// something other than `()` here; bind it with
    /// [`discarding`](Self::discarding) instead. A function item or `&fn`
    /// pointer passed here is bound as an object and called through one more
    /// indirection; use [`from_fn`](Self::from_fn) or
    /// [`from_fn_ptr`](Self::from_fn_ptr) to store its code address directly.
    ///
    /// # Examples
    /// ```
    /// use fnview::FunctionView;
    ///
    /// let offset = 10;
    /// let shift = |x: u8| x + offset;
    ///
    /// // The result `u8` converts into the declared `u32`
    /// let view = FunctionView::<fn(u8) -> u32>::new(&shift);
    /// assert_eq!(view.call(5), 15u32);
    /// ```
    #[inline]
    pub fn new<F>(callable: &'a F) -> Self
    where
        F: InvokeRef<S::Args>,
        F::Output: Into<S::Return>,
    {
        Self::with_policy::<Convert, F>(callable)
    }

    /// Creates a view of `callable` for a signature without a result,
    /// dropping whatever `callable` returns.
    ///
    /// # Examples
    /// ```
    /// use core::cell::Cell;
    ///
    /// use fnview::FunctionView;
    ///
    /// let last = Cell::new(0);
    /// let store = |x: i32| last.replace(x);
    ///
    /// let view = FunctionView::<fn(i32)>::discarding(&store);
    /// view.call(4);
    /// assert_eq!(last.get(), 4);
    /// ```
    #[inline]
    pub fn discarding<F>(callable: &'a F) -> Self
    where
        S: Signature<Return = ()>,
        F: InvokeRef<S::Args>,
    {
        Self::with_policy::<Discard, F>(callable)
    }

    /// Creates a view of `callable`, converting its result with the policy
    /// `P`.
    ///
    /// See the [`policy`](crate::policy) module for an example.
    #[inline]
    pub fn with_policy<P, F>(callable: &'a F) -> Self
    where
        F: InvokeRef<S::Args>,
        P: ReturnPolicy<F::Output, S::Return>,
    {
        trace_bind!(F, "object");
        let raw = RawFunctionView::bind_ref::<F, P>(callable);

        // SAFETY:
        // 1. `callable` was bound with `bind_ref` and is borrowed immutably for `'a`.
        unsafe { Self::from_raw(raw) }
    }

    /// Creates a view of a function pointer with exactly the signature `S`.
    ///
    /// The code address is stored in the view directly. Function items
    /// coerce to the signature type, so they can be passed by name.
    ///
    /// # Examples
    /// ```
    /// use fnview::FunctionView;
    ///
    /// fn is_vowel(c: char) -> bool {
    ///     "aeiou".contains(c)
    /// }
    ///
    /// let view = FunctionView::<fn(char) -> bool>::from_fn(is_vowel);
    /// assert!(view.call('e'));
    /// assert!(!view.call('x'));
    /// ```
    #[inline]
    pub fn from_fn(function: S) -> Self
    where
        S: FnPointer<S::Args, Output = S::Return>,
    {
        Self::from_fn_ptr::<S>(function)
    }

    /// Creates a view of a function pointer whose result converts into the
    /// declared result with [`Into`].
    ///
    /// # Examples
    /// ```
    /// use fnview::FunctionView;
    ///
    /// fn byte_len(text: &'static str) -> u32 {
    ///     text.len() as u32
    /// }
    ///
    /// let view =
    ///     FunctionView::<fn(&'static str) -> u64>::from_fn_ptr(byte_len as fn(&'static str) -> u32);
    /// assert_eq!(view.call("four"), 4u64);
    /// ```
    #[inline]
    pub fn from_fn_ptr<Fp>(function: Fp) -> Self
    where
        Fp: FnPointer<S::Args>,
        Fp::Output: Into<S::Return>,
    {
        trace_bind!(Fp, "fn_ptr");
        let raw = RawFunctionView::bind_fn_pointer::<Fp, Convert>(function);

        // SAFETY:
        // 1. The view is bound to a function pointer, not to an object.
        unsafe { Self::from_raw(raw) }
    }

    /// Creates a view of a function pointer for a signature without a
    /// result, dropping whatever the function returns.
    ///
    /// # Examples
    /// ```
    /// use fnview::FunctionView;
    ///
    /// fn parse(text: &'static str) -> Result<i32, core::num::ParseIntError> {
    ///     text.parse()
    /// }
    ///
    /// let view = FunctionView::<fn(&'static str)>::from_fn_ptr_discarding(
    ///     parse as fn(&'static str) -> Result<i32, core::num::ParseIntError>,
    /// );
    /// view.call("not a number");
    /// ```
    #[inline]
    pub fn from_fn_ptr_discarding<Fp>(function: Fp) -> Self
    where
        S: Signature<Return = ()>,
        Fp: FnPointer<S::Args>,
    {
        trace_bind!(Fp, "fn_ptr");
        let raw = RawFunctionView::bind_fn_pointer::<Fp, Discard>(function);

        // SAFETY:
        // 1. The view is bound to a function pointer, not to an object.
        unsafe { Self::from_raw(raw) }
    }

    /// Returns `true` if the view is bound to a callable.
    #[inline]
    pub fn is_bound(&self) -> bool {
        self.raw.is_bound()
    }

    /// Returns `true` if the view is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.is_bound()
    }

    /// Resets the view to the empty state.
    ///
    /// Copies made earlier are not affected.
    ///
    /// # Examples
    /// ```
    /// use fnview::FunctionView;
    ///
    /// let noop = || {};
    /// let mut view = FunctionView::<fn()>::new(&noop);
    /// let copy = view;
    ///
    /// view.clear();
    /// assert!(view.is_empty());
    /// assert!(copy.is_bound());
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Calls the bound callable with the argument tuple `args`.
    ///
    /// This is the form of `call` available in code that is generic over the
    /// signature.
    ///
    /// # Panics
    ///
    /// Panics if the view is empty. Use [`FunctionView::try_invoke`] to
    /// handle that case instead.
    ///
    /// # Examples
    /// ```
    /// use fnview::{FunctionView, Signature};
    ///
    /// fn call_with<S: Signature>(view: FunctionView<'_, S>, args: S::Args) -> S::Return {
    ///     view.invoke(args)
    /// }
    ///
    /// let add = |a: i32, b: i32| a + b;
    /// assert_eq!(call_with(FunctionView::<fn(i32, i32) -> i32>::new(&add), (2, 3)), 5);
    /// ```
    #[inline]
    #[track_caller]
    pub fn invoke(&self, args: S::Args) -> S::Return {
        // SAFETY:
        // 1. The callable is borrowed for `'a`, which outlives `self`, so it is alive
        //    and has not been moved.
        // 2. The callable was bound with `bind_ref` and is borrowed immutably for `'a`,
        //    so no mutable reference to it is live.
        // 3. Does not apply, the view was not bound with `bind_mut`.
        let result = unsafe { self.raw.invoke(args) };
        match result {
            Some(result) => result,
            None => panic!("{}", EmptyViewError),
        }
    }

    /// Calls the bound callable with the argument tuple `args`, or returns
    /// an [`EmptyViewError`] if the view is empty.
    ///
    /// # Examples
    /// ```
    /// use fnview::{FunctionView, markers::Null};
    ///
    /// let view: FunctionView<'_, fn(u8) -> u8> = Null.into();
    /// assert!(view.try_invoke((1,)).is_err());
    ///
    /// let double = |x: u8| x * 2;
    /// let view = FunctionView::<fn(u8) -> u8>::new(&double);
    /// assert_eq!(view.try_invoke((4,)), Ok(8));
    /// ```
    #[inline]
    pub fn try_invoke(&self, args: S::Args) -> Result<S::Return, EmptyViewError> {
        // SAFETY:
        // 1. The callable is borrowed for `'a`, which outlives `self`, so it is alive
        //    and has not been moved.
        // 2. The callable was bound with `bind_ref` and is borrowed immutably for `'a`,
        //    so no mutable reference to it is live.
        // 3. Does not apply, the view was not bound with `bind_mut`.
        let result = unsafe { self.raw.invoke(args) };
        result.ok_or_else(|| {
            debug_empty!(S);
            EmptyViewError
        })
    }

    /// Calls the bound callable with the argument tuple `args`, without
    /// checking that the view is bound.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The view is bound, i.e. [`FunctionView::is_bound`] returns `true`.
    ///
    /// # Examples
    /// ```
    /// use fnview::FunctionView;
    ///
    /// let negate = |x: i64| -x;
    /// let view = FunctionView::<fn(i64) -> i64>::new(&negate);
    /// assert!(view.is_bound());
    ///
    /// // SAFETY: The view was just bound
    /// let result = unsafe { view.invoke_unchecked((8,)) };
    /// assert_eq!(result, -8);
    /// ```
    #[inline]
    pub unsafe fn invoke_unchecked(&self, args: S::Args) -> S::Return {
        // SAFETY:
        // 1. The view is bound (guaranteed by the caller).
        // 2. Lifetime and aliasing hold for the same reasons as in `invoke`.
        unsafe { self.raw.invoke_unchecked(args) }
    }
}

/// Implements `call` for the signature of one arity.
macro_rules! impl_call {
    ($($arg:ident: $ty:ident),*) => {
        impl<'a, R, $($ty),*> FunctionView<'a, fn($($ty),*) -> R> {
            /// Calls the bound callable with the declared parameters.
            ///
            /// # Panics
            ///
            /// Panics if the view is empty.
            #[inline]
            #[track_caller]
            pub fn call(&self, $($arg: $ty),*) -> R {
                self.invoke(($($arg,)*))
            }
        }
    };
}

for_each_arity!(impl_call);

impl<'a, S> Default for FunctionView<'a, S>
where
    S: Signature,
{
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, S> fmt::Debug for FunctionView<'a, S>
where
    S: Signature,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionView")
            .field("signature", &core::any::type_name::<S>())
            .field("bound", &self.is_bound())
            .finish()
    }
}

impl<'a, S> From<Null> for FunctionView<'a, S>
where
    S: Signature,
{
    fn from(_: Null) -> Self {
        Self::empty()
    }
}

impl<'a, S, F> From<&'a F> for FunctionView<'a, S>
where
    S: Signature,
    F: InvokeRef<S::Args>,
    F::Output: Into<S::Return>,
{
    fn from(callable: &'a F) -> Self {
        Self::new(callable)
    }
}

impl<'a, S> PartialEq<Null> for FunctionView<'a, S>
where
    S: Signature,
{
    fn eq(&self, _: &Null) -> bool {
        self.is_empty()
    }
}

impl<'a, S> PartialEq<FunctionView<'a, S>> for Null
where
    S: Signature,
{
    fn eq(&self, view: &FunctionView<'a, S>) -> bool {
        view.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;
    use crate::invoke::InvokeMut;

    fn double(x: i32) -> i32 {
        x * 2
    }

    fn widen(x: u8) -> u8 {
        x
    }

    type Predicate<'a> = FunctionView<'a, fn(i32) -> bool>;

    static_assertions::assert_impl_all!(Predicate<'static>: Copy, Clone, Default);
    static_assertions::assert_not_impl_any!(Predicate<'static>: Send, Sync);
    static_assertions::assert_not_impl_any!(
        Predicate<'static>: InvokeRef<(i32,)>,
        InvokeMut<(i32,)>,
        FnPointer<(i32,)>
    );

    #[test]
    fn test_function_view_size() {
        assert_eq!(
            core::mem::size_of::<Predicate<'static>>(),
            2 * core::mem::size_of::<usize>()
        );
        assert_eq!(
            core::mem::size_of::<FunctionView<'static, fn(u64, u64, u64) -> [u8; 64]>>(),
            2 * core::mem::size_of::<usize>()
        );
    }

    #[test]
    fn test_threshold() {
        let threshold = 5;
        let above = |x: i32| x > threshold;
        let view = Predicate::new(&above);

        assert!(!view.call(3));
        assert!(view.call(7));
        assert!(!view.call(5));
    }

    #[test]
    fn test_counter() {
        let counter = Cell::new(0);
        let increment = || counter.set(counter.get() + 1);
        let view = FunctionView::<fn()>::new(&increment);

        view.call();
        view.call();
        view.call();
        assert_eq!(counter.get(), 3);
    }

    #[test]
    fn test_empty_states() {
        let default = Predicate::default();
        let null: Predicate<'_> = Null.into();
        let empty = Predicate::empty();

        for view in [default, null, empty] {
            assert!(view.is_empty());
            assert!(!view.is_bound());
            assert!(view == Null);
            assert!(Null == view);
        }

        let always = |_: i32| true;
        let view = Predicate::from(&always);
        assert!(view.is_bound());
        assert!(view != Null);
        assert!(Null != view);
    }

    #[test]
    fn test_try_invoke_empty() {
        let view = Predicate::empty();
        assert_eq!(view.try_invoke((1,)), Err(EmptyViewError));
    }

    #[test]
    #[should_panic(expected = "called an empty function view")]
    fn test_invoke_empty_panics() {
        let view = Predicate::empty();
        view.call(1);
    }

    #[test]
    fn test_from_fn() {
        let view = FunctionView::<fn(i32) -> i32>::from_fn(double);
        assert_eq!(view.call(21), 42);
        assert_eq!(view.invoke((4,)), double(4));
    }

    #[test]
    fn test_function_item_paths_agree() {
        let by_address = FunctionView::<fn(i32) -> i32>::from_fn(double);
        let by_object = FunctionView::<fn(i32) -> i32>::new(&double);
        let pointer: fn(i32) -> i32 = double;
        let by_pointer_object = FunctionView::<fn(i32) -> i32>::new(&pointer);

        for x in [-3, 0, 21] {
            assert_eq!(by_address.call(x), by_object.call(x));
            assert_eq!(by_address.call(x), by_pointer_object.call(x));
        }
    }

    #[test]
    fn test_discarding_non_unit_result() {
        let last = Cell::new(0);
        let echo = |x: i32| {
            last.set(x);
            x
        };
        let view = FunctionView::<fn(i32)>::discarding(&echo);
        view.call(9);
        assert_eq!(last.get(), 9);
    }

    #[test]
    fn test_from_fn_ptr_converts() {
        let view = FunctionView::<fn(u8) -> u64>::from_fn_ptr(widen as fn(u8) -> u8);
        assert_eq!(view.call(200), 200u64);
    }

    #[test]
    fn test_from_fn_ptr_discarding() {
        let view = FunctionView::<fn(i32)>::from_fn_ptr_discarding(double as fn(i32) -> i32);
        view.call(1);
        assert!(view.is_bound());
    }

    #[test]
    fn test_discarding() {
        let calls = Cell::new(0u32);
        let count = |step: u32| {
            calls.set(calls.get() + step);
            calls.get()
        };
        let view = FunctionView::<fn(u32)>::discarding(&count);

        view.call(2);
        view.call(3);
        assert_eq!(calls.get(), 5);
    }

    #[test]
    fn test_copies_share_state() {
        let total = Cell::new(0);
        let add = |x: i32| {
            total.set(total.get() + x);
            total.get()
        };
        let original = FunctionView::<fn(i32) -> i32>::new(&add);
        let copy = original;

        assert_eq!(original.call(1), 1);
        assert_eq!(copy.call(10), 11);
        assert_eq!(original.call(100), 111);
        assert_eq!(total.get(), 111);
    }

    #[test]
    fn test_clear() {
        let identity = |x: i32| x;
        let mut view = FunctionView::<fn(i32) -> i32>::new(&identity);
        let copy = view;

        view.clear();
        assert!(view.is_empty());
        assert_eq!(copy.call(9), 9);
    }

    #[test]
    fn test_invoke_unchecked() {
        let identity = |x: i32| x;
        let view = FunctionView::<fn(i32) -> i32>::new(&identity);

        // SAFETY: The view is bound.
        let result = unsafe { view.invoke_unchecked((3,)) };
        assert_eq!(result, 3);
    }
}
