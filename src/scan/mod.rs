// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Prohibition scanning over source text, files and trees.

mod prohibitions;

pub use prohibitions::{Prohibition, Scanner, BUILTIN_PROHIBITIONS};
