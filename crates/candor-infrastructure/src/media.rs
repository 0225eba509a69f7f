//! Local stream allocator.

use async_trait::async_trait;
use candor_core::error::Result;
use candor_core::session::StreamAllocator;
use uuid::Uuid;

/// A [`StreamAllocator`] that hands out locally generated handles.
///
/// Stands in for the external media provisioning service in development and
/// tests. Handles are unique per allocation and carry a recognizable prefix
/// so they are easy to spot in logs and snapshots.
#[derive(Debug, Clone, Default)]
pub struct LocalStreamAllocator;

impl LocalStreamAllocator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StreamAllocator for LocalStreamAllocator {
    async fn allocate(&self) -> Result<String> {
        Ok(format!("stream-{}", Uuid::new_v4()))
    }
}
