use crate::entities::Upload;
use crate::error::{invalid_input_error, Error};

pub fn require_text(field: &str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(invalid_input_error(format!("{} must not be empty", field)));
    }

    Ok(())
}

pub fn require_images(images: &[Upload]) -> Result<(), Error> {
    if images.is_empty() {
        return Err(invalid_input_error("at least one image is required"));
    }

    if let Some(other) = images.iter().find(|image| !image.is_image()) {
        return Err(invalid_input_error(format!(
            "{} is not an image ({})",
            other.filename, other.content_type
        )));
    }

    Ok(())
}
