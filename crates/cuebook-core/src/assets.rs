use crate::identifiers::AssetId;

/// Seam to the external asset store. The engine only passes resolved URLs
/// through; `None` degrades to a placeholder downstream instead of failing
/// the replay.
pub trait AssetResolver {
    fn image_url(&self, asset: &AssetId) -> Option<String>;
    fn audio_url(&self, asset: &AssetId) -> Option<String>;
    fn video_url(&self, asset: &AssetId) -> Option<String>;
}

/// Resolver that knows no assets. Every reference degrades to a placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAssetResolver;

impl AssetResolver for NullAssetResolver {
    fn image_url(&self, _asset: &AssetId) -> Option<String> {
        None
    }

    fn audio_url(&self, _asset: &AssetId) -> Option<String> {
        None
    }

    fn video_url(&self, _asset: &AssetId) -> Option<String> {
        None
    }
}
