//! Request middleware.
//!
//! Purpose: define middleware components for request lifecycle concerns such
//! as trace identifiers and request-scoped context.

pub mod trace;

pub use trace::{RequestContext, TRACE_ID_HEADER, Trace};
