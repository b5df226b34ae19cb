/// Invokes the given macro once per supported arity, passing a list of
/// `name: Type` pairs for the parameters.
///
/// Mirrors the arity range of `fnview-internals`, which implements the
/// invocation traits for the same argument tuples.
macro_rules! for_each_arity {
    ($callback:ident) => {
        $callback!();
        $callback!(a1: A1);
        $callback!(a1: A1, a2: A2);
        $callback!(a1: A1, a2: A2, a3: A3);
        $callback!(a1: A1, a2: A2, a3: A3, a4: A4);
        $callback!(a1: A1, a2: A2, a3: A3, a4: A4, a5: A5);
        $callback!(a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6);
        $callback!(a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6, a7: A7);
        $callback!(a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6, a7: A7, a8: A8);
        $callback!(a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6, a7: A7, a8: A8, a9: A9);
        $callback!(
            a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6, a7: A7, a8: A8, a9: A9, a10: A10
        );
        $callback!(
            a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6, a7: A7, a8: A8, a9: A9, a10: A10,
            a11: A11
        );
        $callback!(
            a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6, a7: A7, a8: A8, a9: A9, a10: A10,
            a11: A11, a12: A12
        );
    };
}

/// Emits a `trace` event describing a freshly bound view.
///
/// The first argument is the type of the bound callable, the second one of
/// `"object"`, `"object_mut"` or `"fn_ptr"`.
#[cfg(feature = "tracing")]
macro_rules! trace_bind {
    ($callable:ty, $strategy:literal) => {
        ::tracing::trace!(
            target: "fnview",
            callable = ::core::any::type_name::<$callable>(),
            strategy = $strategy,
            "bound function view"
        )
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_bind {
    ($callable:ty, $strategy:literal) => {};
}

/// Emits a `debug` event for a checked invocation of an empty view.
#[cfg(feature = "tracing")]
macro_rules! debug_empty {
    ($signature:ty) => {
        ::tracing::debug!(
            target: "fnview",
            signature = ::core::any::type_name::<$signature>(),
            "invoked an empty function view"
        )
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_empty {
    ($signature:ty) => {};
}
