mod mut_;
mod ref_;

pub use self::{mut_::FunctionViewMut, ref_::FunctionView};
