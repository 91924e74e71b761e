use bytes::Bytes;
use serde::{Deserialize, Serialize};

pub const IMAGE_DOWNLOAD_NAME: &str = "ai_generated_image.png";
pub const IMAGE_DOWNLOAD_MIME: &str = "image/png";

/// Static facts about the business every generation is produced for.
/// Built once at startup and prefixed verbatim to every composed prompt.
#[derive(Debug, Clone)]
pub struct BusinessContext {
    pub name: &'static str,
    pub activity: &'static str,
    pub mission: &'static str,
    pub website: &'static str,
    pub catalog_url: &'static str,
    pub instagram_url: &'static str,
    pub facebook_url: &'static str,
}

impl Default for BusinessContext {
    fn default() -> Self {
        Self {
            name: "Premium Home",
            activity: "a builder of metal-frame houses, prefabricated buildings and tiny houses in Cyprus",
            mission: "The team helps European customers plan durable, affordable and energy-efficient living spaces.",
            website: "https://www.premiumpluscy.eu",
            catalog_url: "https://www.premiumpluscy.eu/catalogue",
            instagram_url: "https://www.instagram.com/",
            facebook_url: "https://www.facebook.com/",
        }
    }
}

/// Target publishing venues with dedicated prompt templates. Unknown tags
/// fall back to the generic social-post template instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformProfile {
    Instagram,
    Facebook,
    LinkedIn,
    BlogArticle,
    EmailNewsletter,
    GenericSocial,
}

impl PlatformProfile {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "Instagram" => Self::Instagram,
            "Facebook" => Self::Facebook,
            "LinkedIn" => Self::LinkedIn,
            "Genel Blog Yazısı" => Self::BlogArticle,
            "E-posta Bülteni" => Self::EmailNewsletter,
            _ => Self::GenericSocial,
        }
    }
}

/// A generated image ready for transport: raw bytes plus the fixed download
/// name and MIME type the browser receives.
#[derive(Debug, Clone)]
pub struct ImageArtifact {
    pub data: Bytes,
    pub file_name: &'static str,
    pub mime_type: &'static str,
}

impl ImageArtifact {
    pub fn png(data: Bytes) -> Self {
        Self {
            data,
            file_name: IMAGE_DOWNLOAD_NAME,
            mime_type: IMAGE_DOWNLOAD_MIME,
        }
    }
}

/// Response of the backend's video endpoint, passed through to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoJob {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
}

/// Statistics payload from the backend, forwarded unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialStats {
    pub facebook_instagram_stats: serde_json::Value,
    pub youtube_stats: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_platform_tags_map_to_their_profile() {
        assert_eq!(PlatformProfile::from_tag("Instagram"), PlatformProfile::Instagram);
        assert_eq!(PlatformProfile::from_tag("Facebook"), PlatformProfile::Facebook);
        assert_eq!(PlatformProfile::from_tag("LinkedIn"), PlatformProfile::LinkedIn);
        assert_eq!(PlatformProfile::from_tag("Genel Blog Yazısı"), PlatformProfile::BlogArticle);
        assert_eq!(PlatformProfile::from_tag("E-posta Bülteni"), PlatformProfile::EmailNewsletter);
    }

    #[test]
    fn unknown_tags_fall_back_to_generic() {
        assert_eq!(PlatformProfile::from_tag("TikTok"), PlatformProfile::GenericSocial);
        assert_eq!(PlatformProfile::from_tag(""), PlatformProfile::GenericSocial);
        assert_eq!(PlatformProfile::from_tag("  Instagram  "), PlatformProfile::Instagram);
    }
}
