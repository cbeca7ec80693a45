//! Normalized document model and parse driver for network device
//! configuration text.
//!
//! This crate provides:
//! - a keyed tree model (`Document`, `Node`, `Value`, `Key`)
//! - attribute merge primitives (scalar replace, set union, list append)
//! - a line scanner and an indentation-tracking parse driver generic over a
//!   [`Dialect`]
//!
//! Dialect crates supply the command dispatch; this crate owns structure.
//! Configuration text implies nesting only through leading whitespace and
//! most blocks have no closing token, so the driver keeps an explicit stack
//! of open scope frames and pops it whenever depth decreases.
//!
//! # Example
//!
//! ```rust
//! use cfgnorm_ir::{Dialect, Document, Step, parse_with_dialect};
//!
//! struct Hosts;
//!
//! impl Dialect for Hosts {
//!     type Scope = String;
//!
//!     fn apply(
//!         &self,
//!         doc: &mut Document,
//!         scopes: &[String],
//!         tokens: &[String],
//!     ) -> Step<String> {
//!         match tokens {
//!             [kw, name] if kw == "host" => {
//!                 doc.root_mut().child("host").child(name.as_str());
//!                 Step::Open(name.clone())
//!             }
//!             [kw, value] if kw == "alias" => {
//!                 if let Some(host) = scopes.last() {
//!                     doc.root_mut()
//!                         .child("host")
//!                         .child(host.as_str())
//!                         .union("alias", [value.as_str()]);
//!                 }
//!                 Step::Leaf
//!             }
//!             _ => Step::Skip,
//!         }
//!     }
//! }
//!
//! let doc = parse_with_dialect("host web\n alias www\n", &Hosts).unwrap();
//! assert!(doc.root().get("host").is_some());
//! ```

mod model;
mod parse;
mod scan;

pub use model::{Document, Key, Node, Value};
pub use parse::{Dialect, ParseError, Step, apply_with_dialect, parse_with_dialect};
pub use scan::{ScannedLine, TriviaKind, classify_trivia, scan_lines, tokenize};
