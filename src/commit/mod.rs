// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message parsing.

mod ignore;
mod message;

pub use ignore::{is_default_ignored, IgnoreMatcher};
pub use message::{clean_message, normalize_message, parse, parse_raw, ParsedCommit};
