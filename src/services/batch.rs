use crate::api::error::AppError;
use crate::models::{BatchRequest, BatchResponse, ObjectResult, Operation, SHA256_ALGO};
use crate::services::store::ObjectStore;
use std::sync::Arc;

/// Protocol-level decision making for `POST /objects/batch`: turns the
/// client's declared object list into per-object transfer actions or
/// errors. Never touches object bytes; only consults the store for
/// existence.
pub struct BatchNegotiator {
    store: Arc<ObjectStore>,
    max_object_size: u64,
}

impl BatchNegotiator {
    pub fn new(store: Arc<ObjectStore>, max_object_size: u64) -> Self {
        Self {
            store,
            max_object_size,
        }
    }

    /// Produces one result entry per requested object, in request order.
    ///
    /// An unsupported hash algorithm rejects the whole request before any
    /// object is looked at. An oversized declared size fails only that
    /// object (code 422); the rest of the batch is still serviced. Uploads
    /// always get an action href, deduplication happens when the bytes
    /// arrive; downloads get a 404 entry when the object is absent.
    pub async fn negotiate(
        &self,
        base_url: &str,
        request: BatchRequest,
    ) -> Result<BatchResponse, AppError> {
        if request.hash_algo != SHA256_ALGO {
            return Err(AppError::UnsupportedHashAlgorithm(request.hash_algo));
        }

        let mut objects = Vec::with_capacity(request.objects.len());
        for spec in &request.objects {
            if spec.size > self.max_object_size {
                objects.push(ObjectResult::failure(
                    spec,
                    422,
                    "object exceeds maximum size",
                ));
                continue;
            }

            let entry = match request.operation {
                Operation::Upload => {
                    ObjectResult::action(request.operation, spec, self.object_href(base_url, spec))
                }
                Operation::Download => {
                    if self.store.exists(&spec.oid).await {
                        ObjectResult::action(
                            request.operation,
                            spec,
                            self.object_href(base_url, spec),
                        )
                    } else {
                        ObjectResult::failure(spec, 404, "object not found")
                    }
                }
            };
            objects.push(entry);
        }

        Ok(BatchResponse::new(objects))
    }

    fn object_href(&self, base_url: &str, spec: &crate::models::ObjectSpec) -> String {
        format!("{}/objects/{}", base_url, spec.oid)
    }
}
