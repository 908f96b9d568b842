//! Media type value object - how an asset node is classified

use serde::Serialize;

/// Classification of a node in the asset tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Raster image (png, jpg, webp, ...)
    Image,
    /// Vector graphic (svg)
    Vector,
    /// Frame animation (lottie json)
    Animation,
    /// Any other file
    Unknown,
    /// Directory node
    Directory,
}

impl MediaType {
    /// Extensions classified as raster images (lowercase, without dot)
    pub const IMAGE_EXTENSIONS: &'static [&'static str] =
        &["png", "jpg", "jpeg", "webp", "gif", "bmp", "wbmp", "ico"];

    /// Extensions that may hold an animation and need a content probe
    pub const ANIMATION_CANDIDATE_EXTENSIONS: &'static [&'static str] = &["json", "lottie"];

    /// Classification implied by the extension alone
    ///
    /// Animation candidates return `None`: they are decided by content.
    pub fn from_extension(ext: &str) -> Option<MediaType> {
        let ext = ext.to_ascii_lowercase();
        if Self::IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaType::Image)
        } else if ext == "svg" {
            Some(MediaType::Vector)
        } else if Self::ANIMATION_CANDIDATE_EXTENSIONS.contains(&ext.as_str()) {
            None
        } else {
            Some(MediaType::Unknown)
        }
    }

    /// Whether this is a leaf type (not a directory)
    pub fn is_leaf(&self) -> bool {
        !matches!(self, MediaType::Directory)
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MediaType::Image => "image",
            MediaType::Vector => "vector",
            MediaType::Animation => "animation",
            MediaType::Unknown => "unknown",
            MediaType::Directory => "directory",
        };
        f.write_str(name)
    }
}
