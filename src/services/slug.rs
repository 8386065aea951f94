// src/services/slug.rs
// DOCUMENTATION: URL slug generation
// PURPOSE: Derive unique URL-safe identifiers from English titles

use crate::errors::TravelError;
use std::future::Future;

/// Turn a title into a URL-safe slug
/// DOCUMENTATION: Lowercases, maps runs of non-alphanumerics to single
/// hyphens, trims hyphens from both ends
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_was_hyphen = true; // swallow leading separators

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        "item".to_string()
    } else {
        slug
    }
}

/// Find a slug no other row holds yet
/// DOCUMENTATION: Starts from slugify(base) and appends -2, -3, ...
/// until the checker reports it free
pub async fn find_available_slug<F, Fut>(base: &str, slug_taken: F) -> Result<String, TravelError>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<bool, TravelError>>,
{
    let base = slugify(base);

    if !slug_taken(base.clone()).await? {
        return Ok(base);
    }

    for n in 2..=500u32 {
        let candidate = format!("{}-{}", base, n);
        if !slug_taken(candidate.clone()).await? {
            log::debug!("Slug '{}' taken, using '{}'", base, candidate);
            return Ok(candidate);
        }
    }

    Err(TravelError::InternalError(format!(
        "No available slug for '{}'",
        base
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Desert Escape"), "desert-escape");
        assert_eq!(slugify("Bali & Lombok: 7 Nights"), "bali-lombok-7-nights");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  Red   Sea --- Diving  "), "red-sea-diving");
    }

    #[test]
    fn test_slugify_strips_non_ascii() {
        // Arabic titles slug from their ASCII content only
        assert_eq!(slugify("Dubai دبي 2025"), "dubai-2025");
    }

    #[test]
    fn test_slugify_empty_falls_back() {
        assert_eq!(slugify(""), "item");
        assert_eq!(slugify("---"), "item");
    }

    #[tokio::test]
    async fn test_find_available_slug_free() {
        let slug = find_available_slug("Desert Escape", |_| async { Ok(false) })
            .await
            .unwrap();
        assert_eq!(slug, "desert-escape");
    }

    #[tokio::test]
    async fn test_find_available_slug_appends_counter() {
        // "desert-escape" and "desert-escape-2" taken, "-3" free
        let slug = find_available_slug("Desert Escape", |candidate| async move {
            Ok(candidate == "desert-escape" || candidate == "desert-escape-2")
        })
        .await
        .unwrap();
        assert_eq!(slug, "desert-escape-3");
    }
}
