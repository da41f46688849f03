//! Client library for the TechVib app: a post feed fetched over GraphQL and
//! a Gemini-backed chat assistant with locally persisted history.

// Strict lint policy: no unsafe, no panicking shortcuts in library code.
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(unused_must_use)]
#![deny(clippy::all)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::print_stdout)]

pub mod chat;
pub mod feed;
