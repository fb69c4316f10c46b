// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! S3 implementation of the object store port.
//!
//! The AWS SDK is async while the rest of the exporter is a plain sequential
//! program, so the store owns a current-thread runtime and blocks on each call.

use crate::config::StorageConfig;
use crate::domain::entities::UploadRequest;
use crate::domain::errors::{ExportError, Result};
use crate::ports::object_store_port::{ObjectStore, ObjectStoreProvider};
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use log::{debug, info};
use tokio::runtime::Runtime;

/// Builds an `S3ObjectStore` from ambient AWS credentials.
#[derive(Debug, Default)]
pub struct S3StoreProvider;

impl ObjectStoreProvider for S3StoreProvider {
    fn open(&self, config: &StorageConfig) -> Result<Box<dyn ObjectStore>> {
        Ok(Box::new(S3ObjectStore::new(config)?))
    }
}

pub struct S3ObjectStore {
    runtime: Runtime,
    client: Client,
}

impl S3ObjectStore {
    pub fn new(config: &StorageConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let client = runtime.block_on(async {
            let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
            if let Some(region) = &config.region {
                loader = loader.region(Region::new(region.clone()));
            }
            let sdk_config = loader.load().await;

            let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
            if let Some(endpoint) = &config.endpoint {
                builder = builder.endpoint_url(endpoint).force_path_style(true);
            }
            Client::from_conf(builder.build())
        });

        info!(
            "S3 client initialized for bucket {}{}",
            config.bucket,
            config
                .endpoint
                .as_deref()
                .map(|e| format!(" via {}", e))
                .unwrap_or_default()
        );

        Ok(Self { runtime, client })
    }
}

impl ObjectStore for S3ObjectStore {
    fn put_file(&self, request: &UploadRequest) -> Result<()> {
        let storage_err = |reason: String| ExportError::StorageError {
            key: request.object_key.clone(),
            reason,
        };

        self.runtime.block_on(async {
            let body = ByteStream::from_path(&request.local_path)
                .await
                .map_err(|e| storage_err(e.to_string()))?;

            debug!(
                "Uploading {} to s3://{}/{}",
                request.local_path.display(),
                request.bucket,
                request.object_key
            );

            self.client
                .put_object()
                .bucket(&request.bucket)
                .key(&request.object_key)
                .body(body)
                .send()
                .await
                .map_err(|e| storage_err(DisplayErrorContext(&e).to_string()))?;

            Ok::<(), ExportError>(())
        })
    }
}
