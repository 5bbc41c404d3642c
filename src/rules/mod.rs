// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine module for policy validation.
//!
//! Compiles configuration and an optional policy document into a rule set,
//! and checks commit messages and source text against it.

mod builtin;
mod engine;
mod findings;

pub use engine::{RuleSet, Validator};
pub use findings::{Finding, Report, Severity};
