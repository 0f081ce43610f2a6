use deunicode::deunicode;

/// Derives a URL-safe slug from a display name.
///
/// The name is transliterated to ASCII, lowercased, and every run of
/// characters other than `[a-z0-9]` becomes a single `-`. `&` reads as
/// "and". Leading and trailing separators are dropped, so a name with no
/// alphanumerics yields an empty string.
pub fn slugify(name: &str) -> String {
    let ascii = deunicode(&name.replace('&', " and "));
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_separator = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_slugify_examples() {
        assert_eq!(slugify("Fresh Fruits"), "fresh-fruits");
        assert_eq!(slugify("Drinks"), "drinks");
        assert_eq!(slugify("Cola"), "cola");
        assert_eq!(slugify("  Fresh   Fruits  "), "fresh-fruits");
        assert_eq!(slugify("Fresh-Fruits!"), "fresh-fruits");
        assert_eq!(slugify("Salt & Pepper"), "salt-and-pepper");
        assert_eq!(slugify("Crème Brûlée"), "creme-brulee");
        assert_eq!(slugify("Молоко"), "moloko");
        assert_eq!(slugify("iPhone 15 Pro"), "iphone-15-pro");
        assert_eq!(slugify("???"), "");
    }

    #[test]
    fn test_names_that_collide() {
        assert_eq!(slugify("Fresh Fruits"), slugify("fresh-fruits"));
        assert_eq!(slugify("FRESH FRUITS"), slugify("Fresh  Fruits"));
    }

    proptest! {
        #[test]
        fn prop_slug_is_url_safe(name in "\\PC{0,40}") {
            let slug = slugify(&name);
            prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }

        #[test]
        fn prop_slugify_is_idempotent(name in "\\PC{0,40}") {
            let slug = slugify(&name);
            prop_assert_eq!(slugify(&slug), slug);
        }
    }
}
