// src/backend/storage/assets.rs
use crate::models::{AssetId, ImageAsset};
use crate::storage::memory::{get_image_assets_memory, Memory};
use crate::storage::storable::Cbor;
use ic_stable_structures::StableBTreeMap;
use std::cell::RefCell;

type StorableImageAsset = Cbor<ImageAsset>;

thread_local! {
    // AssetId (sha256 hex of the bytes) -> image
    static IMAGE_ASSETS: RefCell<StableBTreeMap<AssetId, StorableImageAsset, Memory>> = RefCell::new(
        StableBTreeMap::init(get_image_assets_memory())
    );
}

pub fn insert_asset(asset: ImageAsset) {
    IMAGE_ASSETS.with(|map_ref| {
        map_ref.borrow_mut().insert(asset.asset_id.clone(), Cbor(asset));
    });
}

pub fn get_asset(asset_id: &AssetId) -> Option<ImageAsset> {
    IMAGE_ASSETS.with(|map_ref| map_ref.borrow().get(asset_id).map(|c| c.0))
}

pub fn contains_asset(asset_id: &AssetId) -> bool {
    IMAGE_ASSETS.with(|map_ref| map_ref.borrow().contains_key(asset_id))
}
