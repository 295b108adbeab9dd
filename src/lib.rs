//! Match chat messages against declared commands.
//!
//! A [`Registry`] holds command definitions. Matching a message such as
//! `!ban someone --delay 10 "spamming links"` yields, per overload of `ban`, the
//! resolved arguments, flags, and any tokens that fit no declared field.
//!
//! ```
//! use chatmatch::{DefinitionSpec, FieldSpec, Registry};
//!
//! let mut registry = Registry::default();
//! registry
//!     .add([DefinitionSpec::new("ban")
//!         .args(["member".into(), FieldSpec::content("reason")])
//!         .flags(["delay"])])
//!     .unwrap();
//!
//! let results = registry.match_message("!ban someone --delay 10 spamming links").unwrap();
//! assert_eq!(results[0].arg("reason").and_then(|v| v.as_str()), Some("spamming links"));
//! assert_eq!(results[0].flag("delay").and_then(|v| v.as_str()), Some("10"));
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod registry;

pub use config::{CommandFile, ConfigError, Quote, Settings};
pub use error::RegistryError;
pub use matcher::{FieldValue, MatchResult, Unknown};
pub use registry::{Definition, DefinitionSpec, Field, FieldKind, FieldSpec, MatchKind, Registry};
