//! Module containing the type-erased callable reference

mod payload;
mod raw;
mod trampoline;

pub use self::raw::RawFunctionView;
