//! Internal utility types and macros.

/// Marker type used as the pointee of an erased object address.
///
/// This zero-sized type stands in for the concrete callable type once it has
/// been erased. A `*const Erased` is never dereferenced; it is only cast back
/// to `*const F` for the `F` the trampoline was instantiated with.
pub(crate) struct Erased;

/// Invokes the given macro once per supported arity, passing a list of
/// `name: Type` pairs for the parameters.
///
/// Arities 0 through 12 are covered, the same range the standard library
/// implements tuple traits for.
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

pub(crate) use for_each_arity;
