//! Git LFS Batch API wire types.
//!
//! The Batch API is how clients negotiate upload/download URLs for LFS
//! objects before any bytes move.
//! See: https://github.com/git-lfs/git-lfs/blob/main/docs/api/batch.md

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The only hash algorithm this backend supports.
pub const SHA256_ALGO: &str = "sha256";

/// The only transfer adapter this backend supports.
pub const BASIC_TRANSFER: &str = "basic";

/// Operation type for batch requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Download objects from the server.
    Download,
    /// Upload objects to the server.
    Upload,
}

impl Operation {
    /// The key this operation uses in a response's `actions` map.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Download => "download",
            Operation::Upload => "upload",
        }
    }
}

/// A batch request from an LFS client.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchRequest {
    /// The operation to perform.
    pub operation: Operation,
    /// The transfer adapters the client supports.
    #[serde(default = "default_transfers")]
    pub transfers: Vec<String>,
    /// The objects to operate on.
    pub objects: Vec<ObjectSpec>,
    /// The digest algorithm the oids were computed with.
    #[serde(default = "default_hash_algo")]
    pub hash_algo: String,
}

fn default_transfers() -> Vec<String> {
    vec![BASIC_TRANSFER.to_string()]
}

fn default_hash_algo() -> String {
    SHA256_ALGO.to_string()
}

/// An object as declared by the client in a batch request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectSpec {
    /// The SHA-256 oid of the object.
    pub oid: String,
    /// The size of the object in bytes, as declared by the client.
    pub size: u64,
}

/// A batch response sent back to the client.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResponse {
    /// The negotiated transfer adapter (always "basic").
    pub transfer: String,
    /// One result per requested object, in request order.
    pub objects: Vec<ObjectResult>,
    /// The digest algorithm in effect (always "sha256").
    pub hash_algo: String,
}

impl BatchResponse {
    pub fn new(objects: Vec<ObjectResult>) -> Self {
        BatchResponse {
            transfer: BASIC_TRANSFER.to_string(),
            objects,
            hash_algo: SHA256_ALGO.to_string(),
        }
    }
}

/// Per-object outcome of batch negotiation: either the actions the client
/// should follow, or the error that makes the object unservable. Exactly
/// one shape per object; the enum keeps that exhaustive at compile time.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ObjectResult {
    Actions {
        oid: String,
        size: u64,
        actions: HashMap<String, Action>,
    },
    Failure {
        oid: String,
        size: u64,
        error: ObjectError,
    },
}

impl ObjectResult {
    /// Result entry carrying a single transfer action for `operation`.
    pub fn action(operation: Operation, spec: &ObjectSpec, href: String) -> Self {
        let mut actions = HashMap::new();
        actions.insert(operation.as_str().to_string(), Action { href });
        ObjectResult::Actions {
            oid: spec.oid.clone(),
            size: spec.size,
            actions,
        }
    }

    /// Result entry reporting a per-object error.
    pub fn failure(spec: &ObjectSpec, code: u16, message: &str) -> Self {
        ObjectResult::Failure {
            oid: spec.oid.clone(),
            size: spec.size,
            error: ObjectError {
                code,
                message: message.to_string(),
            },
        }
    }
}

/// An action (upload/download URL) for an object.
#[derive(Debug, Clone, Serialize)]
pub struct Action {
    /// The URL the client should use for the transfer.
    pub href: String,
}

/// Error information for a single object in a batch response.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectError {
    /// HTTP status code.
    pub code: u16,
    /// Error message.
    pub message: String,
}
