//! Prompt composition. Pure string building: no I/O, no provider calls,
//! identical inputs always produce identical prompts.

use crate::models::{BusinessContext, PlatformProfile};

/// Suffix appended when an image prompt falls back to the last generated text.
pub const SOCIAL_IMAGE_QUALIFIER: &str =
    "Make it a memorable, professional and modern visual for a social media post.";

/// Question sent to the vision model when the caller supplies none.
pub const DEFAULT_VISION_QUESTION: &str = "What do you see in this image?";

pub fn business_context_block(ctx: &BusinessContext) -> String {
    format!(
        "You are the social media assistant of {}, {}. {} Website: {} | Catalogue: {} | Instagram: {} | Facebook: {}",
        ctx.name, ctx.activity, ctx.mission, ctx.website, ctx.catalog_url, ctx.instagram_url, ctx.facebook_url
    )
}

fn language_instruction(language: &str) -> String {
    format!("Write the output in {language}.")
}

/// Free-form content request: context block, the user's prompt, then the
/// output-language instruction.
pub fn compose_free_text(ctx: &BusinessContext, user_prompt: &str, language: &str) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        business_context_block(ctx),
        user_prompt.trim(),
        language_instruction(language)
    )
}

/// Reformat a finished text for one publishing venue. Ends with the literal
/// source text so the model rewrites exactly what the user produced.
pub fn compose_platform_format(
    ctx: &BusinessContext,
    text: &str,
    profile: PlatformProfile,
    language: &str,
) -> String {
    let instructions = match profile {
        PlatformProfile::Instagram => {
            "Rewrite the text below as an engaging, short and punchy Instagram post. \
             Use short paragraphs, emoji and trending hashtags for readability, add a clear \
             call to action, and keep the original meaning within Instagram's length limits."
        }
        PlatformProfile::Facebook => {
            "Rewrite the text below as a warm, informative Facebook post aimed at community \
             engagement. Use questions that invite comments, community-minded phrasing and \
             fitting hashtags, so it works alongside a photo or video and starts a conversation."
        }
        PlatformProfile::LinkedIn => {
            "Rewrite the text below as an informative, authoritative LinkedIn post. Use \
             industry insight, professional vocabulary and relevant hashtags, offer value to \
             professionals and investors in the prefabricated housing sector and invite discussion."
        }
        PlatformProfile::BlogArticle => {
            "Rewrite the text below as a blog article with an explicit main title, subheadings \
             and paragraphs. Structure it with an introduction, a body broken up by subheadings \
             and a conclusion, and keep it keyword-rich, informative and SEO-friendly."
        }
        PlatformProfile::EmailNewsletter => {
            "Rewrite the text below as a short e-mail newsletter. Suggest a clear subject line, \
             open with a brief intro, highlight the main benefits as short bullets or paragraphs \
             and close with a clear call to action."
        }
        PlatformProfile::GenericSocial => {
            "Rewrite the text below as an engaging social media post suitable for any platform. \
             Add emoji and fitting hashtags where they help, and keep the original meaning intact."
        }
    };
    format!(
        "{}\n\n{}\nRemember to include the business links ({} and {}) in the result.\n\n{}\n\nText:\n\n{}",
        business_context_block(ctx),
        instructions,
        ctx.website,
        ctx.catalog_url,
        language_instruction(language),
        text
    )
}

/// Topic request for a YouTube video concept: titles, key points, a short
/// script outline and shot ideas.
pub fn compose_youtube_idea(ctx: &BusinessContext, topic: &str, language: &str) -> String {
    format!(
        "{}\n\nCome up with a YouTube video idea about '{}'. Include title suggestions, the key \
         points the video should cover, a short script outline (intro, body, outro) and ideas \
         for visuals and shots.\n\n{}",
        business_context_block(ctx),
        topic.trim(),
        language_instruction(language)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx() -> BusinessContext {
        BusinessContext::default()
    }

    #[test]
    fn composition_is_deterministic() {
        let a = compose_free_text(&ctx(), "Write about tiny houses", "English");
        let b = compose_free_text(&ctx(), "Write about tiny houses", "English");
        assert_eq!(a, b);

        let c = compose_platform_format(&ctx(), "Some text", PlatformProfile::LinkedIn, "Türkçe");
        let d = compose_platform_format(&ctx(), "Some text", PlatformProfile::LinkedIn, "Türkçe");
        assert_eq!(c, d);
    }

    #[test]
    fn free_text_prompt_carries_context_and_language() {
        let prompt = compose_free_text(&ctx(), "Benefits of prefab housing", "Ελληνικά");
        assert!(prompt.starts_with(&business_context_block(&ctx())));
        assert!(prompt.contains("Benefits of prefab housing"));
        assert!(prompt.ends_with("Write the output in Ελληνικά."));
    }

    #[test]
    fn unknown_platform_tag_uses_generic_template() {
        let profile = PlatformProfile::from_tag("Mastodon");
        let prompt = compose_platform_format(&ctx(), "Hello", profile, "English");
        assert!(prompt.contains("suitable for any platform"));
        assert!(!prompt.is_empty());
        assert!(prompt.contains(&business_context_block(&ctx())));
        assert!(prompt.contains("Write the output in English."));
    }

    #[test]
    fn blog_format_contains_structure_and_ends_with_source_text() {
        let profile = PlatformProfile::from_tag("Genel Blog Yazısı");
        assert_eq!(profile, PlatformProfile::BlogArticle);

        let prompt = compose_platform_format(&ctx(), "X", profile, "English");
        let block = business_context_block(&ctx());
        assert_eq!(prompt.matches(&block).count(), 1);
        assert!(prompt.contains("subheadings"));
        assert!(prompt.contains("introduction"));
        assert!(prompt.ends_with("X"));
    }

    #[test]
    fn platform_templates_remind_about_business_links() {
        for tag in ["Instagram", "Facebook", "LinkedIn", "E-posta Bülteni"] {
            let prompt =
                compose_platform_format(&ctx(), "text", PlatformProfile::from_tag(tag), "English");
            assert!(prompt.contains(ctx().website), "missing website for {tag}");
            assert!(prompt.contains(ctx().catalog_url), "missing catalogue for {tag}");
        }
    }

    #[test]
    fn youtube_prompt_mentions_script_outline() {
        let prompt = compose_youtube_idea(&ctx(), "building a tiny house", "Türkçe");
        assert!(prompt.contains("script outline"));
        assert!(prompt.contains("building a tiny house"));
        assert!(prompt.ends_with("Write the output in Türkçe."));
    }
}
