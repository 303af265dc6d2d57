//! services/client/src/flows/space.rs
//!
//! Creating a living space and managing its images and bookings.

use crate::app::App;
use crate::error::ClientError;
use crate::flows::Route;
use futures::future::join_all;
use pairpad_core::coliving::{
    BookingRequest, ImageUpdate, ImageUpload, LivingSpace, RoomApplication,
};
use pairpad_core::domain::RecordId;
use pairpad_core::forms::space::{self, SpaceForm};
use pairpad_core::wizard::MultiStepForm;
use tracing::{error, info};

pub struct SpaceFlow {
    form: MultiStepForm<SpaceForm>,
}

impl SpaceFlow {
    pub fn new() -> Result<Self, ClientError> {
        Ok(Self {
            form: space::wizard()?,
        })
    }

    pub fn form(&self) -> &MultiStepForm<SpaceForm> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut MultiStepForm<SpaceForm> {
        &mut self.form
    }

    /// Creates the space, house rules included, and routes to its page.
    pub async fn submit(&mut self, app: &App) -> Result<Route, ClientError> {
        let draft = self.form.begin_submit()?.to_draft();

        match app.backend.coliving.create_space(&draft).await {
            Ok(space) => {
                self.form.complete();
                app.notifier.success("Living space created successfully!");
                Ok(Route::Space(space.id))
            }
            Err(e) => {
                error!("Failed to create living space: {}", e);
                let message = e.user_message("Failed to create living space. Please try again.");
                match e.field_errors() {
                    Some(fields) => self
                        .form
                        .fail_submit_with_fields(message.clone(), fields.clone()),
                    None => self.form.fail_submit(message.clone()),
                }
                app.notifier.error(&message);
                Err(e.into())
            }
        }
    }
}

//=========================================================================================
// Images
//=========================================================================================

/// Uploads images one after another. The first image of a space without any
/// becomes its primary image. Stops at the first failure; earlier uploads stay.
pub async fn upload_images(
    app: &App,
    space: &mut LivingSpace,
    uploads: Vec<ImageUpload>,
) -> Result<(), ClientError> {
    for mut upload in uploads {
        upload.is_primary = space.images.is_empty();
        match app.backend.coliving.upload_image(space.id, upload).await {
            Ok(image) => space.images.push(image),
            Err(e) => {
                error!("Failed to upload image: {}", e);
                app.notifier.error(&e.user_message("Failed to upload image"));
                return Err(e.into());
            }
        }
    }
    Ok(())
}

/// Makes `image_id` the only primary image of the space.
///
/// The current primary images are unset concurrently before the new one is set.
pub async fn set_primary_image(
    app: &App,
    space: &mut LivingSpace,
    image_id: RecordId,
) -> Result<(), ClientError> {
    let unset = ImageUpdate {
        is_primary: Some(false),
        caption: None,
    };
    let demotions = space
        .images
        .iter()
        .filter(|image| image.is_primary && image.id != image_id)
        .map(|image| app.backend.coliving.update_image(image.id, &unset));

    let outcome = async {
        for result in join_all(demotions).await {
            result?;
        }
        let promote = ImageUpdate {
            is_primary: Some(true),
            caption: None,
        };
        app.backend.coliving.update_image(image_id, &promote).await
    }
    .await;

    match outcome {
        Ok(_) => {
            for image in space.images.iter_mut() {
                image.is_primary = image.id == image_id;
            }
            Ok(())
        }
        Err(e) => {
            error!("Failed to set primary image: {}", e);
            app.notifier.error(&e.user_message("Failed to set primary image"));
            Err(e.into())
        }
    }
}

pub async fn delete_image(
    app: &App,
    space: &mut LivingSpace,
    image_id: RecordId,
) -> Result<(), ClientError> {
    match app.backend.coliving.delete_image(image_id).await {
        Ok(()) => {
            space.images.retain(|image| image.id != image_id);
            Ok(())
        }
        Err(e) => {
            error!("Failed to delete image: {}", e);
            app.notifier.error(&e.user_message("Failed to delete image"));
            Err(e.into())
        }
    }
}

//=========================================================================================
// Bookings and removal
//=========================================================================================

pub async fn book_room(
    app: &App,
    room_id: RecordId,
    booking: &BookingRequest,
) -> Result<RoomApplication, ClientError> {
    match app.backend.coliving.book_room(room_id, booking).await {
        Ok(application) => {
            info!("Applied for room {}", room_id);
            app.notifier.success("Booking request submitted successfully!");
            Ok(application)
        }
        Err(e) => {
            error!("Failed to submit booking request: {}", e);
            app.notifier
                .error(&e.user_message("Failed to submit booking request"));
            Err(e.into())
        }
    }
}

pub async fn delete_space(app: &App, space_id: RecordId) -> Result<Route, ClientError> {
    match app.backend.coliving.delete_space(space_id).await {
        Ok(()) => {
            app.notifier.success("Living space deleted successfully");
            Ok(Route::Dashboard)
        }
        Err(e) => {
            error!("Failed to delete living space: {}", e);
            app.notifier
                .error(&e.user_message("Failed to delete living space"));
            Err(e.into())
        }
    }
}
