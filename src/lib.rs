#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]

//! A minimal and smart URI builder with correct percent-encoding.
//!
//! [`UriBuilder`] accumulates the components of a URI reference as defined in
//! IETF [RFC 3986] (scheme, userinfo, host, port, path segments, query
//! parameters and fragment) in their logical form, and percent-encodes them only
//! when [`build`](UriBuilder::build) is called. The output is always a
//! syntactically valid URI reference: reserved characters never leak through,
//! unreserved characters are never encoded, and nothing is encoded twice.
//!
//! ```
//! use uribuilder_tiny::UriBuilder;
//!
//! let uri = UriBuilder::new()
//!     .with_scheme("https")
//!     .with_userinfo("me")
//!     .with_host("example.com")
//!     .with_port(8443)
//!     .append_path("search")
//!     .add_query_param("q", "rust & uri")
//!     .add_query_param("lang", "en")
//!     .with_fragment("results")
//!     .build()?;
//!
//! assert_eq!(
//!     uri,
//!     "https://me@example.com:8443/search?q=rust%20%26%20uri&lang=en#results"
//! );
//! # Ok::<_, uribuilder_tiny::error::BuildError>(())
//! ```
//!
//! A base URI can be parsed once into a [`BaseUri`] and used to hand out
//! any number of pre-filled builders.
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/
//!
//! # Crate features
//!
//! - `std` (default): Enables [`Error`] implementations.
//!   Implies `impl-error`.
//!
//! - `impl-error`: Enables [`Error`] implementations on the error types.
//!
//! - `serde`: Enables [`serde`] support for [`BaseUri`].
//!
//! [`Error`]: core::error::Error
//! [`serde`]: https://docs.rs/serde

extern crate alloc;

#[cfg(feature = "impl-error")]
use core::error::Error;

mod base;
pub mod build;
pub mod component;
pub mod error;
mod fmt;
mod parse;
pub mod pct_enc;

pub use base::BaseUri;
pub use build::UriBuilder;
