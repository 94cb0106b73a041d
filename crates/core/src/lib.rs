//! Core library for yelptools
//!
//! This crate implements the **Functional Core** of yelptools, following the
//! Functional Core - Imperative Shell pattern:
//!
//! - **`yelptools_core`** (this crate): pure transformation functions, zero I/O
//! - **`yelptools`**: credential loading, HTTP transport, CLI and file export
//!
//! Every function here is deterministic and testable with fixture data. The
//! OAuth signer takes its nonce and timestamp as inputs, and the mapper takes
//! response bodies as plain strings, so no test needs a network.
//!
//! # Module Organization
//!
//! - [`credentials`]: OAuth credential set and properties-file parsing
//! - [`request`]: endpoint URLs and query parameters for search and lookup
//! - [`oauth`]: OAuth 1.0a HMAC-SHA1 request signing
//! - [`business`]: the flat business record
//! - [`mapper`]: JSON response to business record transformations
//! - [`export`]: CSV rendering of business records
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use yelptools_core::mapper::extract_businesses;
//!
//! let batch = extract_businesses(&body)?;
//! for business in &batch.records {
//!     println!("{} ({})", business.name(), business.url());
//! }
//! ```

pub mod business;
pub mod credentials;
pub mod export;
pub mod mapper;
pub mod oauth;
pub mod request;
