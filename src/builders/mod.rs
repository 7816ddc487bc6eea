//! Document builders (component E, SPEC_FULL §4.3): fluent, chainable
//! constructors that validate invariants at `build()`/`done()` time rather than
//! on every intermediate call.

pub mod mt_builder;
pub mod pain_builder;

pub use mt_builder::{BatchOrderBuilder, SingleOrderBuilder, StatementBuilder};
pub use pain_builder::PainBatchBuilder;
