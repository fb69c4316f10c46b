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

//! # Object Store Port
//!
//! Anything that can take a local file and store it under a bucket/key.

use crate::config::StorageConfig;
use crate::domain::entities::UploadRequest;
use crate::domain::errors::Result;

pub trait ObjectStore {
    /// Transfers the file's bytes to `request.bucket` under `request.object_key`,
    /// overwriting any existing object with that key.
    fn put_file(&self, request: &UploadRequest) -> Result<()>;
}

/// Builds an `ObjectStore` once the run's configuration is known.
pub trait ObjectStoreProvider {
    fn open(&self, config: &StorageConfig) -> Result<Box<dyn ObjectStore>>;
}
