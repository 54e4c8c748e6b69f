// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for halfcell tools (session, notices, config, prefs).
//! Keeps front-ends thin and framework-agnostic.

pub mod config;
pub mod notice;
pub mod prefs;
pub mod session;

pub use session::{Session, SessionError};
