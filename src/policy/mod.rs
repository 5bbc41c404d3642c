// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Policy document model and parsing.

mod document;

pub use document::{PolicyDocument, PolicyRule, RuleCategory};
