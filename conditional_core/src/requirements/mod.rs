//! Requirements module - the preconditions a conditional can test.
//!
//! A requirement is a tagged record: its `type` names the kind and selects the
//! evaluator, the remaining fields parameterize it. Every kind carries a
//! negation flag that inverts the evaluator's answer.

mod requirement;
mod token;

pub use requirement::*;
pub use token::*;
