mod qp;
mod safer;

pub use qp::*;
pub use safer::*;
