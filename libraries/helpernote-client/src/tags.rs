//! Tag operations.

use crate::envelope::{item, page};
use crate::error::Result;
use crate::transport::Transport;
use helpernote_core::validation::validate_tag;
use helpernote_core::{CreateTag, Page, Tag, TagId, UpdateTag};

pub struct TagsClient<'a> {
    transport: &'a Transport,
}

impl<'a> TagsClient<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub async fn create(&self, tag: &CreateTag) -> Result<Tag> {
        validate_tag(tag)?;
        let value = self.transport.post("/api/tags", tag).await?;
        item(value, "tag")
    }

    pub async fn list(&self) -> Result<Page<Tag>> {
        let value = self.transport.get("/api/tags").await?;
        page(value, "tags")
    }

    pub async fn get(&self, id: TagId) -> Result<Tag> {
        let value = self
            .transport
            .get(&format!("/api/tags/{}", id))
            .await?;
        item(value, "tag")
    }

    pub async fn update(&self, id: TagId, update: &UpdateTag) -> Result<Tag> {
        let value = self
            .transport
            .put(&format!("/api/tags/{}", id), update)
            .await?;
        item(value, "tag")
    }

    pub async fn delete(&self, id: TagId) -> Result<()> {
        self.transport.delete(&format!("/api/tags/{}", id)).await
    }
}
