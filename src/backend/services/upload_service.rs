// src/backend/services/upload_service.rs
// Image asset store: the canister side of the editor's upload gateway.

use crate::{
    error::InvitationError,
    metrics,
    models::{AssetId, ImageAsset},
    storage::assets as asset_storage,
    utils::{crypto::calculate_sha256_hex, time::get_current_time_ns},
};

pub const MAX_IMAGE_SIZE_BYTES: usize = 5 * 1024 * 1024; // 5 MB per image
pub const ASSET_PATH_PREFIX: &str = "/assets/";

/// True for `image/*` mime types, the only uploads the editor offers.
pub fn is_image_mime_type(mime_type: &str) -> bool {
    mime_type
        .trim()
        .to_ascii_lowercase()
        .strip_prefix("image/")
        .is_some_and(|subtype| !subtype.is_empty())
}

/// Public reference under which an asset is served.
pub fn asset_reference(asset_id: &str) -> String {
    format!("{}{}", ASSET_PATH_PREFIX, asset_id)
}

/// Stores an image and returns its public reference.
///
/// Assets are content-addressed: uploading identical bytes twice yields the
/// same reference and stores them once.
pub fn store_image(filename: String, mime_type: String, data: Vec<u8>) -> Result<String, InvitationError> {
    if !is_image_mime_type(&mime_type) {
        return Err(InvitationError::UploadError(format!("'{}' is not an image type", mime_type)));
    }
    if data.is_empty() {
        return Err(InvitationError::UploadError("Image cannot be empty".to_string()));
    }
    if data.len() > MAX_IMAGE_SIZE_BYTES {
        return Err(InvitationError::UploadError(format!(
            "Image size {} exceeds limit {}",
            data.len(),
            MAX_IMAGE_SIZE_BYTES
        )));
    }

    let asset_id = calculate_sha256_hex(&data);
    if asset_storage::contains_asset(&asset_id) {
        log::info!("Image '{}' already stored as {}", filename, asset_id);
        return Ok(asset_reference(&asset_id));
    }

    let size_bytes = data.len() as u64;
    asset_storage::insert_asset(ImageAsset {
        asset_id: asset_id.clone(),
        filename,
        mime_type,
        data,
        size_bytes,
        created_at: get_current_time_ns(),
    });
    metrics::record_image_stored(size_bytes);

    log::info!("Stored image {} ({} bytes)", asset_id, size_bytes);
    Ok(asset_reference(&asset_id))
}

/// Looks up an asset by id or by its full public reference.
pub fn get_image(id_or_reference: &str) -> Result<ImageAsset, InvitationError> {
    let asset_id: AssetId = id_or_reference
        .strip_prefix(ASSET_PATH_PREFIX)
        .unwrap_or(id_or_reference)
        .to_string();
    asset_storage::get_asset(&asset_id).ok_or(InvitationError::NotFound(format!("asset {}", asset_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::get_metrics;

    #[test]
    fn recognizes_image_mime_types() {
        assert!(is_image_mime_type("image/png"));
        assert!(is_image_mime_type("IMAGE/JPEG"));
        assert!(!is_image_mime_type("image/"));
        assert!(!is_image_mime_type("application/pdf"));
    }

    #[test]
    fn stores_and_serves_an_image_by_reference() {
        let reference = store_image("cover.png".into(), "image/png".into(), vec![1, 2, 3]).unwrap();
        assert!(reference.starts_with(ASSET_PATH_PREFIX));

        let asset = get_image(&reference).unwrap();
        assert_eq!(asset.data, vec![1, 2, 3]);
        assert_eq!(asset.filename, "cover.png");
        assert_eq!(get_image(&asset.asset_id).unwrap(), asset);
    }

    #[test]
    fn identical_bytes_are_stored_once() {
        let a = store_image("a.png".into(), "image/png".into(), vec![9; 16]).unwrap();
        let b = store_image("b.png".into(), "image/png".into(), vec![9; 16]).unwrap();
        assert_eq!(a, b);
        assert_eq!(get_metrics().images_stored, 1);
        assert_eq!(get_metrics().image_bytes_stored, 16);
    }

    #[test]
    fn rejects_non_images_empty_and_oversized_uploads() {
        assert!(matches!(
            store_image("a.pdf".into(), "application/pdf".into(), vec![1]),
            Err(InvitationError::UploadError(_))
        ));
        assert!(matches!(
            store_image("a.png".into(), "image/png".into(), vec![]),
            Err(InvitationError::UploadError(_))
        ));
        assert!(matches!(
            store_image("a.png".into(), "image/png".into(), vec![0; MAX_IMAGE_SIZE_BYTES + 1]),
            Err(InvitationError::UploadError(_))
        ));
    }

    #[test]
    fn unknown_asset_is_not_found() {
        assert!(matches!(get_image("/assets/deadbeef"), Err(InvitationError::NotFound(_))));
    }
}
