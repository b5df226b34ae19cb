use core::{fmt, marker::PhantomData};

use fnview_internals::{
    RawFunctionView,
    invoke::{FnPointer, InvokeMut},
    policy::{Convert, Discard, ReturnPolicy},
};

use crate::{EmptyViewError, FunctionView, Signature, markers::Null};

/// A non-owning reference to a callable with the signature `S` that may
/// mutate its own state.
///
/// Unlike [`FunctionView`], this view binds an exclusive reference, so it
/// accepts any [`FnMut`] callable. For the same reason it is not [`Copy`],
/// and it is called through `&mut self`. Use [`FunctionViewMut::reborrow`]
/// to pass it to a nested call without giving it up.
///
/// # Examples
///
/// ```
/// use fnview::FunctionViewMut;
///
/// fn squares(limit: u32, mut emit: FunctionViewMut<'_, fn(u32)>) {
///     for n in 1..=limit {
///         emit.call(n * n);
///     }
/// }
///
/// let mut seen = Vec::new();
/// let mut collect = |square: u32| seen.push(square);
/// squares(4, FunctionViewMut::new(&mut collect));
/// assert_eq!(seen, [1, 4, 9, 16]);
/// ```
#[repr(transparent)]
pub struct FunctionViewMut<'a, S>
where
    S: Signature,
{
    raw: RawFunctionView<S::Args, S::Return>,
    _callable: PhantomData<&'a mut ()>,
    _signature: PhantomData<S>,
}

impl<'a, S> FunctionViewMut<'a, S>
where
    S: Signature,
{
    /// Creates a view from a raw view.
    ///
    /// # Safety
    ///
    /// To call this method you must ensure the following:
    ///
    /// - If `raw` is bound to a callable object with
    ///   [`RawFunctionView::bind_mut`], the object stays borrowed mutably for
    ///   `'a`, and no other view holds the same raw view during `'a`.
    /// - If `raw` is bound to a callable object with
    ///   [`RawFunctionView::bind_ref`], the object stays borrowed immutably
    ///   for `'a`.
    const unsafe fn from_raw(raw: RawFunctionView<S::Args, S::Return>) -> Self {
        Self {
            raw,
            _callable: PhantomData,
            _signature: PhantomData,
        }
    }

    /// Creates an empty view.
    #[inline]
    pub const fn empty() -> Self {
        // SAFETY:
        // 1. The view is empty, so it is not bound to any object.
        unsafe { Self::from_raw(RawFunctionView::empty()) }
    }

    /// Creates a view of `callable`, converting its result with [`Into`].
    ///
    /// For a signature without a result, a callable returning anything but
    /// `()` goes through [`discarding`](Self::discarding). Plain functions are
    /// better bound with [`from_fn`](Self::from_fn), which stores the code
    /// address instead of a reference to it.
    ///
    /// # Examples
    /// ```
    /// use fnview::FunctionViewMut;
    ///
    /// let mut calls = 0u8;
    /// let mut count = || {
    ///     calls += 1;
    ///     calls
    /// };
    ///
    /// let mut view = FunctionViewMut::<fn() -> u16>::new(&mut count);
    /// assert_eq!(view.call(), 1u16);
    /// assert_eq!(view.call(), 2u16);
    /// ```
    #[inline]
    pub fn new<F>(callable: &'a mut F) -> Self
    where
        F: InvokeMut<S::Args>,
        F::Output: Into<S::Return>,
    {
        Self::with_policy::<Convert, F>(callable)
    }

    /// Creates a view of `callable` for a signature without a result,
    /// dropping whatever `callable` returns.
    #[inline]
    pub fn discarding<F>(callable: &'a mut F) -> Self
    where
        S: Signature<Return = ()>,
        F: InvokeMut<S::Args>,
    {
        Self::with_policy::<Discard, F>(callable)
    }

    /// Creates a view of `callable`, converting its result with the policy
    /// `P`.
    #[inline]
    pub fn with_policy<P, F>(callable: &'a mut F) -> Self
    where
        F: InvokeMut<S::Args>,
        P: ReturnPolicy<F::Output, S::Return>,
    {
        trace_bind!(F, "object_mut");
        let raw = RawFunctionView::bind_mut::<F, P>(callable);

        // SAFETY:
        // 1. `callable` was bound with `bind_mut` and is borrowed mutably for `'a`, and
        //    `raw` is moved into the only view holding it.
        unsafe { Self::from_raw(raw) }
    }

    /// Creates a view of a function pointer with exactly the signature `S`.
    #[inline]
    pub fn from_fn(function: S) -> Self
    where
        S: FnPointer<S::Args, Output = S::Return>,
    {
        FunctionView::<'a, S>::from_fn(function).into()
    }

    /// Creates a view of a function pointer whose result converts into the
    /// declared result with [`Into`].
    #[inline]
    pub fn from_fn_ptr<Fp>(function: Fp) -> Self
    where
        Fp: FnPointer<S::Args>,
        Fp::Output: Into<S::Return>,
    {
        FunctionView::<'a, S>::from_fn_ptr(function).into()
    }

    /// Creates a view of a function pointer for a signature without a
    /// result, dropping whatever the function returns.
    #[inline]
    pub fn from_fn_ptr_discarding<Fp>(function: Fp) -> Self
    where
        S: Signature<Return = ()>,
        Fp: FnPointer<S::Args>,
    {
        FunctionView::<'a, S>::from_fn_ptr_discarding(function).into()
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
    #[inline]
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Borrows the view for a shorter lifetime.
    ///
    /// The returned view calls the same callable. The original view cannot be
    /// used until the returned one is gone.
    ///
    /// # Examples
    /// ```
    /// use fnview::FunctionViewMut;
    ///
    /// fn emit_twice(mut emit: FunctionViewMut<'_, fn(char)>, c: char) {
    ///     emit_once(emit.reborrow(), c);
    ///     emit_once(emit.reborrow(), c);
    /// }
    ///
    /// fn emit_once(mut emit: FunctionViewMut<'_, fn(char)>, c: char) {
    ///     emit.call(c);
    /// }
    ///
    /// let mut text = String::new();
    /// let mut push = |c: char| text.push(c);
    /// emit_twice(FunctionViewMut::new(&mut push), 'z');
    /// assert_eq!(text, "zz");
    /// ```
    #[inline]
    pub fn reborrow(&mut self) -> FunctionViewMut<'_, S> {
        // SAFETY:
        // 1. The returned view borrows `self` mutably, so `self` cannot be used while the
        //    returned view exists, and its lifetime is shorter than `'a`.
        // 2. If the callable was bound with `bind_ref`, it is borrowed immutably for `'a`,
        //    which outlives the returned view.
        unsafe { FunctionViewMut::from_raw(self.raw) }
    }

    /// Calls the bound callable with the argument tuple `args`.
    ///
    /// # Panics
    ///
    /// Panics if the view is empty. Use [`FunctionViewMut::try_invoke`] to
    /// handle that case instead.
    #[inline]
    #[track_caller]
    pub fn invoke(&mut self, args: S::Args) -> S::Return {
        // SAFETY:
        // 1. The callable is borrowed for `'a`, which outlives `self`, so it is alive
        //    and has not been moved.
        // 2. If the callable was bound with `bind_ref`, it is borrowed immutably for `'a`,
        //    so no mutable reference to it is live.
        // 3. If the callable was bound with `bind_mut`, it is borrowed mutably for `'a`
        //    by this view alone, and this call holds `&mut self`, so no other call
        //    through the same raw view is in progress.
        let result = unsafe { self.raw.invoke(args) };
        match result {
            Some(result) => result,
            None => panic!("{}", EmptyViewError),
        }
    }

    /// Calls the bound callable with the argument tuple `args`, or returns
    /// an [`EmptyViewError`] if the view is empty.
    #[inline]
    pub fn try_invoke(&mut self, args: S::Args) -> Result<S::Return, EmptyViewError> {
        // SAFETY:
        // 1. The callable is borrowed for `'a`, which outlives `self`, so it is alive
        //    and has not been moved.
        // 2. If the callable was bound with `bind_ref`, it is borrowed immutably for `'a`,
        //    so no mutable reference to it is live.
        // 3. If the callable was bound with `bind_mut`, it is borrowed mutably for `'a`
        //    by this view alone, and this call holds `&mut self`, so no other call
        //    through the same raw view is in progress.
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
    /// 1. The view is bound, i.e. [`FunctionViewMut::is_bound`] returns
    ///    `true`.
    #[inline]
    pub unsafe fn invoke_unchecked(&mut self, args: S::Args) -> S::Return {
        // SAFETY:
        // 1. The view is bound (guaranteed by the caller).
        // 2. Lifetime and aliasing hold for the same reasons as in `invoke`.
        unsafe { self.raw.invoke_unchecked(args) }
    }
}

/// Implements `call` for the signature of one arity.
macro_rules! impl_call {
    ($($arg:ident: $ty:ident),*) => {
        impl<'a, R, $($ty),*> FunctionViewMut<'a, fn($($ty),*) -> R> {
            /// Calls the bound callable with the declared parameters.
            ///
            /// # Panics
            ///
            /// Panics if the view is empty.
            #[inline]
            #[track_caller]
            pub fn call(&mut self, $($arg: $ty),*) -> R {
                self.invoke(($($arg,)*))
            }
        }
    };
}

for_each_arity!(impl_call);

impl<'a, S> Default for FunctionViewMut<'a, S>
where
    S: Signature,
{
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, S> fmt::Debug for FunctionViewMut<'a, S>
where
    S: Signature,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionViewMut")
            .field("signature", &core::any::type_name::<S>())
            .field("bound", &self.is_bound())
            .finish()
    }
}

impl<'a, S> From<Null> for FunctionViewMut<'a, S>
where
    S: Signature,
{
    fn from(_: Null) -> Self {
        Self::empty()
    }
}

impl<'a, S> From<FunctionView<'a, S>> for FunctionViewMut<'a, S>
where
    S: Signature,
{
    fn from(view: FunctionView<'a, S>) -> Self {
        // SAFETY:
        // 1. A `FunctionView` is only ever bound with `bind_ref` to an object borrowed
        //    immutably for `'a`, or to a function pointer.
        unsafe { Self::from_raw(view.into_raw()) }
    }
}

impl<'a, S, F> From<&'a mut F> for FunctionViewMut<'a, S>
where
    S: Signature,
    F: InvokeMut<S::Args>,
    F::Output: Into<S::Return>,
{
    fn from(callable: &'a mut F) -> Self {
        Self::new(callable)
    }
}

impl<'a, S> PartialEq<Null> for FunctionViewMut<'a, S>
where
    S: Signature,
{
    fn eq(&self, _: &Null) -> bool {
        self.is_empty()
    }
}

impl<'a, S> PartialEq<FunctionViewMut<'a, S>> for Null
where
    S: Signature,
{
    fn eq(&self, view: &FunctionViewMut<'a, S>) -> bool {
        view.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;
    use crate::invoke::InvokeRef;

    fn triple(x: i64) -> i64 {
        x * 3
    }

    type Sink<'a> = FunctionViewMut<'a, fn(i64)>;

    static_assertions::assert_impl_all!(Sink<'static>: Default);
    static_assertions::assert_not_impl_any!(Sink<'static>: Copy, Clone, Send, Sync);
    static_assertions::assert_not_impl_any!(
        Sink<'static>: InvokeRef<(i64,)>,
        InvokeMut<(i64,)>,
        FnPointer<(i64,)>
    );

    struct RunningMax {
        max: i64,
    }

    impl InvokeMut<(i64,)> for RunningMax {
        type Output = i64;

        fn invoke_mut(&mut self, (value,): (i64,)) -> i64 {
            self.max = self.max.max(value);
            self.max
        }
    }

    fn drain(mut sink: Sink<'_>, values: &[i64]) {
        for &value in values {
            sink.call(value);
        }
    }

    #[test]
    fn test_function_view_mut_size() {
        assert_eq!(
            core::mem::size_of::<Sink<'static>>(),
            2 * core::mem::size_of::<usize>()
        );
    }

    #[test]
    fn test_accumulates_state() {
        let mut total = 0;
        let mut add = |x: i64| total += x;
        drain(FunctionViewMut::new(&mut add), &[1, 2, 3]);
        assert_eq!(total, 6);
    }

    #[test]
    fn test_function_object() {
        let mut running = RunningMax { max: i64::MIN };
        let mut view = FunctionViewMut::<fn(i64) -> i64>::new(&mut running);

        assert_eq!(view.call(4), 4);
        assert_eq!(view.call(-2), 4);
        assert_eq!(view.call(11), 11);
        assert_eq!(running.max, 11);
    }

    #[test]
    fn test_discarding_function_object() {
        let mut running = RunningMax { max: 0 };
        drain(Sink::discarding(&mut running), &[5, 9, 2]);
        assert_eq!(running.max, 9);
    }

    #[test]
    fn test_reborrow() {
        let mut seen = 0;
        let mut count = |x: i64| seen += x;
        let mut view = Sink::new(&mut count);

        drain(view.reborrow(), &[1, 1]);
        drain(view.reborrow(), &[10]);
        view.call(100);
        assert_eq!(seen, 112);
    }

    #[test]
    fn test_from_function_view() {
        let hits = Cell::new(0);
        let hit = |x: i64| hits.set(hits.get() + x);
        let shared = FunctionView::<fn(i64)>::new(&hit);

        drain(shared.into(), &[2, 3]);
        drain(shared.into(), &[5]);
        assert_eq!(hits.get(), 10);
    }

    #[test]
    fn test_from_fn() {
        let mut view = FunctionViewMut::<fn(i64) -> i64>::from_fn(triple);
        assert_eq!(view.call(5), 15);

        let mut view =
            FunctionViewMut::<fn(i64) -> i128>::from_fn_ptr(triple as fn(i64) -> i64);
        assert_eq!(view.call(-1), -3i128);

        drain(
            Sink::from_fn_ptr_discarding(triple as fn(i64) -> i64),
            &[1, 2],
        );
    }

    #[test]
    fn test_empty_states() {
        let mut view: Sink<'_> = Null.into();
        assert!(view.is_empty());
        assert!(view == Null);
        assert_eq!(view.try_invoke((1,)), Err(EmptyViewError));

        let mut ignore = |_: i64| {};
        view = Sink::from(&mut ignore);
        assert!(view.is_bound());
        assert!(Null != view);

        view.clear();
        assert!(Null == view);
        assert!(Sink::default().is_empty());
    }

    #[test]
    #[should_panic(expected = "called an empty function view")]
    fn test_invoke_empty_panics() {
        let mut view = Sink::empty();
        view.call(1);
    }

    #[test]
    fn test_invoke_unchecked() {
        let mut last = 0;
        let mut store = |x: i64| last = x;
        let mut view = Sink::new(&mut store);

        // SAFETY: The view is bound.
        unsafe { view.invoke_unchecked((7,)) };
        assert_eq!(last, 7);
    }
}
