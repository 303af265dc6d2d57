//! services/client/src/adapters/coliving.rs
//!
//! This module contains the adapter for living spaces, rooms and their images.
//! It implements the `ColivingService` port from the `core` crate.

use crate::adapters::http::RestClient;
use async_trait::async_trait;
use pairpad_core::coliving::{
    BookingRequest, ImageUpdate, ImageUpload, Listing, LivingSpace, LivingSpaceDraft, Room,
    RoomApplication, RoomDraft, SpaceImage, SpaceSearch,
};
use pairpad_core::domain::RecordId;
use pairpad_core::ports::{ColivingService, PortError, PortResult};
use reqwest::multipart::{Form, Part};
use tracing::info;

/// An adapter that implements the `ColivingService` port over the REST API.
#[derive(Clone)]
pub struct RestColivingAdapter {
    rest: RestClient,
}

impl RestColivingAdapter {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl ColivingService for RestColivingAdapter {
    async fn spaces(&self, search: &SpaceSearch) -> PortResult<Vec<LivingSpace>> {
        let spaces: Listing<LivingSpace> =
            self.rest.get_query("/coliving/spaces/", search).await?;
        Ok(spaces.into_vec())
    }

    async fn space(&self, space_id: RecordId) -> PortResult<LivingSpace> {
        self.rest
            .get(&format!("/coliving/spaces/{}/", space_id))
            .await
    }

    async fn my_spaces(&self) -> PortResult<Vec<LivingSpace>> {
        let spaces: Listing<LivingSpace> = self.rest.get("/coliving/spaces/mine/").await?;
        Ok(spaces.into_vec())
    }

    async fn create_space(&self, draft: &LivingSpaceDraft) -> PortResult<LivingSpace> {
        let space: LivingSpace = self.rest.post("/coliving/spaces/", draft).await?;
        info!("Created living space {} ({})", space.id, space.name);
        Ok(space)
    }

    async fn update_space(
        &self,
        space_id: RecordId,
        draft: &LivingSpaceDraft,
    ) -> PortResult<LivingSpace> {
        self.rest
            .put(&format!("/coliving/spaces/{}/", space_id), draft)
            .await
    }

    async fn delete_space(&self, space_id: RecordId) -> PortResult<()> {
        self.rest
            .delete(&format!("/coliving/spaces/{}/", space_id))
            .await
    }

    async fn create_room(&self, draft: &RoomDraft) -> PortResult<Room> {
        self.rest.post("/coliving/rooms/", draft).await
    }

    async fn upload_image(&self, space_id: RecordId, upload: ImageUpload) -> PortResult<SpaceImage> {
        let part = Part::bytes(upload.content.to_vec())
            .file_name(upload.file_name.clone())
            .mime_str(mime_for(&upload.file_name))
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        let form = Form::new()
            .part("image", part)
            .text("caption", upload.caption)
            .text("is_primary", upload.is_primary.to_string());

        self.rest
            .post_multipart(&format!("/coliving/spaces/{}/images/", space_id), form)
            .await
    }

    async fn update_image(&self, image_id: RecordId, update: &ImageUpdate) -> PortResult<SpaceImage> {
        self.rest
            .patch(&format!("/coliving/images/{}/", image_id), update)
            .await
    }

    async fn delete_image(&self, image_id: RecordId) -> PortResult<()> {
        self.rest
            .delete(&format!("/coliving/images/{}/", image_id))
            .await
    }

    async fn book_room(
        &self,
        room_id: RecordId,
        booking: &BookingRequest,
    ) -> PortResult<RoomApplication> {
        self.rest
            .post(&format!("/coliving/rooms/{}/apply/", room_id), booking)
            .await
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".webp") {
        "image/webp"
    } else if lower.ends_with(".gif") {
        "image/gif"
    } else {
        "image/jpeg"
    }
}
