// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine module for commit linting.
//!
//! [`validate`] evaluates the twelve built-in rules against a
//! [`ParsedCommit`](crate::commit::ParsedCommit). It never fails: every
//! problem is reported as a [`Violation`] in one pass.

mod builtin;
mod case;
mod engine;
mod validator;

pub use builtin::validate;
pub use case::{classify_case, CaseStyle};
pub use engine::RuleEngine;
pub use validator::{Field, RuleName, ValidationResult, Violation};
