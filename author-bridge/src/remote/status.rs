//! Bridge errors on the wire.
//!
//! A provider-originated error travels as a gRPC status whose metadata
//! carries the bridge error code under [`BRIDGE_ERROR_KEY`] and the exact
//! detail bytes under [`BRIDGE_ERROR_DETAIL_KEY`]. The status message repeats
//! the detail for humans and tooling only. Any status without the code entry
//! was produced by the transport (refused connection, deadline, undecodable
//! frame) and is reported as [`AuthorError::Unavailable`].

use ::error::ErrorKind;
use author_contract::AuthorError;
use proto::{BRIDGE_ERROR_DETAIL_KEY, BRIDGE_ERROR_KEY};
use tonic::metadata::{BinaryMetadataValue, MetadataValue};
use tonic::{Code, Status};

/// Encode a bridge error as a gRPC status.
pub fn to_status(err: &AuthorError) -> Status {
    let kind = err.kind();
    let code = match kind {
        ErrorKind::NotFound => Code::NotFound,
        ErrorKind::InvalidInput => Code::InvalidArgument,
        ErrorKind::Unavailable => Code::Unavailable,
        ErrorKind::Internal => Code::Internal,
    };

    let mut status = Status::new(code, err.detail());
    let metadata = status.metadata_mut();
    metadata.insert(BRIDGE_ERROR_KEY, MetadataValue::from_static(kind.code()));
    metadata.insert_bin(
        BRIDGE_ERROR_DETAIL_KEY,
        BinaryMetadataValue::from_bytes(err.detail().as_bytes()),
    );
    status
}

/// Decode a gRPC status received by `operation` into a bridge error.
pub fn from_status(operation: &str, status: &Status) -> AuthorError {
    let kind = status
        .metadata()
        .get(BRIDGE_ERROR_KEY)
        .and_then(|value| value.to_str().ok())
        .and_then(ErrorKind::from_code);

    match kind {
        Some(kind) => AuthorError::from_kind(kind, detail(status)),
        None => {
            tracing::warn!(
                operation = %operation,
                code = ?status.code(),
                message = status.message(),
                "author call failed in transport"
            );
            AuthorError::Unavailable(format!(
                "{operation} failed with {:?}: {}",
                status.code(),
                status.message()
            ))
        }
    }
}

/// Exact detail if the binary entry is present and valid UTF-8, otherwise the
/// decoded status message.
fn detail(status: &Status) -> String {
    status
        .metadata()
        .get_bin(BRIDGE_ERROR_DETAIL_KEY)
        .and_then(|value| value.to_bytes().ok())
        .and_then(|bytes| String::from_utf8(bytes.to_vec()).ok())
        .unwrap_or_else(|| status.message().to_string())
}
