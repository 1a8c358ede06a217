pub mod compiler;
pub mod keys;
pub mod spec;

pub use compiler::{CompiledPredicate, FilterCompiler, Predicate};
pub use spec::{FilterSpec, FilterValue};
