//! Outbound sharing URLs for a finalized post. Pure string building; networks
//! without a compose endpoint get the profile URL flagged as manual-only.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::models::BusinessContext;

/// RFC 3986 unreserved characters stay verbatim; everything else is escaped.
const SHARE_TEXT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub fn encode_share_text(text: &str) -> String {
    utf8_percent_encode(text, SHARE_TEXT_SET).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLink {
    pub network: &'static str,
    pub url: String,
    pub manual_only: bool,
}

pub fn build_share_links(ctx: &BusinessContext, text: &str) -> Vec<ShareLink> {
    let encoded = encode_share_text(text);
    vec![
        ShareLink {
            network: "website",
            url: ctx.website.to_string(),
            manual_only: false,
        },
        ShareLink {
            network: "linkedin",
            url: format!("https://www.linkedin.com/feed/?shareActive=true&text={encoded}"),
            manual_only: false,
        },
        ShareLink {
            network: "facebook",
            url: format!("https://www.facebook.com/sharer/sharer.php?quote={encoded}"),
            manual_only: false,
        },
        // Instagram has no programmatic compose endpoint.
        ShareLink {
            network: "instagram",
            url: ctx.instagram_url.to_string(),
            manual_only: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link<'a>(links: &'a [ShareLink], network: &str) -> &'a ShareLink {
        links.iter().find(|l| l.network == network).unwrap()
    }

    #[test]
    fn share_text_is_percent_encoded() {
        assert_eq!(encode_share_text("Hello & welcome"), "Hello%20%26%20welcome");
    }

    #[test]
    fn compose_links_carry_the_encoded_text() {
        let ctx = BusinessContext::default();
        let links = build_share_links(&ctx, "Hello & welcome");

        assert!(link(&links, "facebook").url.contains("Hello%20%26%20welcome"));
        assert!(link(&links, "facebook").url.starts_with("https://www.facebook.com/sharer/sharer.php?quote="));
        assert!(link(&links, "linkedin").url.contains("Hello%20%26%20welcome"));
        assert!(!link(&links, "facebook").manual_only);
        assert!(!link(&links, "linkedin").manual_only);
    }

    #[test]
    fn instagram_falls_back_to_the_profile_url() {
        let ctx = BusinessContext::default();
        let links = build_share_links(&ctx, "anything");

        let instagram = link(&links, "instagram");
        assert_eq!(instagram.url, ctx.instagram_url);
        assert!(instagram.manual_only);
    }

    #[test]
    fn the_website_entry_is_always_included() {
        let ctx = BusinessContext::default();
        let links = build_share_links(&ctx, "post");
        assert_eq!(link(&links, "website").url, ctx.website);
    }

    #[test]
    fn unicode_survives_encoding() {
        let encoded = encode_share_text("Tiny House avantajları");
        assert!(encoded.contains("Tiny%20House"));
        assert!(!encoded.contains('ı'));
    }
}
