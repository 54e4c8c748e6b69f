// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `halfcell` command-line tool.
//!
//! Works on stamps in their base64 text form: list the records of one,
//! frame it for export, or build one from JSON.

pub mod cli;
pub mod report;
