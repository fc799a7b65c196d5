//! The signed-in user's profile.

use crate::envelope::item;
use crate::error::Result;
use crate::transport::Transport;
use helpernote_core::{UpdateProfile, UserProfile};

pub struct ProfileClient<'a> {
    transport: &'a Transport,
}

impl<'a> ProfileClient<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub async fn get(&self) -> Result<UserProfile> {
        let value = self.transport.get("/api/profile").await?;
        item(value, "user")
    }

    pub async fn update(&self, update: &UpdateProfile) -> Result<UserProfile> {
        let value = self.transport.put("/api/profile", update).await?;
        item(value, "user")
    }
}
