//! Shared protobuf definitions for all services
//!
//! Each package is versioned in its name (`author.v1`). A breaking change to
//! a message or method gets a new package rather than an edit in place, so
//! older clients keep talking to the route they were built against.

pub mod author;

/// Metadata key carrying the bridge error code on a failed call.
pub const BRIDGE_ERROR_KEY: &str = "x-bridge-error";

/// Binary metadata key carrying the exact UTF-8 error detail.
///
/// `grpc-message` is percent-encoded by the transport and does not round-trip
/// every string, so the detail travels here as raw bytes.
pub const BRIDGE_ERROR_DETAIL_KEY: &str = "x-bridge-error-detail-bin";
