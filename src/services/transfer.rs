use crate::api::error::AppError;
use crate::services::store::ObjectStore;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

/// Moves object bytes in and out of the store. Upload side turns one inbound
/// stream plus a claimed oid into a published object or a rejection; download
/// side hands back a chunked reader over a published object.
pub struct TransferService {
    store: Arc<ObjectStore>,
    max_object_size: u64,
}

impl TransferService {
    pub fn new(store: Arc<ObjectStore>, max_object_size: u64) -> Self {
        Self {
            store,
            max_object_size,
        }
    }

    /// Receives one upload body for `oid`.
    ///
    /// If the oid is already stored this is a success no-op: the body is
    /// still drained so the connection stays usable, but nothing is written
    /// or hashed. Otherwise the body is streamed into a staging file while a
    /// running digest and byte count accumulate; overflowing the size cap or
    /// finishing with the wrong digest discards the staging file and leaves
    /// no canonical file behind.
    pub async fn receive_object<S>(&self, oid: &str, mut body: S) -> Result<(), AppError>
    where
        S: Stream<Item = Result<Bytes, axum::Error>> + Unpin,
    {
        if self.store.exists(oid).await {
            tracing::info!("object {} already stored, skipping upload", oid);
            while let Some(chunk) = body.next().await {
                if chunk.is_err() {
                    break;
                }
            }
            return Ok(());
        }

        let mut staging = self.store.begin_upload().await?;
        let mut hasher = Sha256::new();
        let mut received: u64 = 0;

        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    self.store.discard(staging).await;
                    return Err(self.map_stream_error(e));
                }
            };

            received += chunk.len() as u64;
            if received > self.max_object_size {
                self.store.discard(staging).await;
                return Err(AppError::PayloadTooLarge(self.max_object_size));
            }

            hasher.update(&chunk);
            if let Err(e) = staging.write_chunk(&chunk).await {
                self.store.discard(staging).await;
                return Err(AppError::Storage(e));
            }
        }

        let computed = hex::encode(hasher.finalize());
        if computed != oid {
            self.store.discard(staging).await;
            return Err(AppError::DigestMismatch {
                declared: oid.to_string(),
                computed,
            });
        }

        self.store.publish(staging, oid).await?;
        tracing::info!("stored object {} ({} bytes)", oid, received);
        Ok(())
    }

    /// Opens a chunked stream over a published object's bytes.
    pub async fn open_download(&self, oid: &str) -> Result<ReaderStream<File>, AppError> {
        if !self.store.exists(oid).await {
            return Err(AppError::NotFound(oid.to_string()));
        }
        let file = self.store.read(oid).await?;
        Ok(ReaderStream::new(file))
    }

    fn map_stream_error(&self, e: axum::Error) -> AppError {
        let err_msg = e.to_string();
        if err_msg.contains("length limit exceeded") {
            AppError::PayloadTooLarge(self.max_object_size)
        } else {
            AppError::BadRequest(err_msg)
        }
    }
}
