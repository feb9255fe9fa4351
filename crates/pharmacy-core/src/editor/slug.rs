/// Derive a URL slug from a title.
///
/// Lower-cases the input, collapses every run of characters outside
/// `[a-z0-9]` into a single `-` and trims hyphens from both ends.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_collapses_punctuation_runs() {
        assert_eq!(slugify("5 Tips! For You"), "5-tips-for-you");
        assert_eq!(slugify("Flu Shots -- Who, What & When?"), "flu-shots-who-what-when");
    }

    #[test]
    fn test_slugify_trims_edges() {
        assert_eq!(slugify("  ...Hello World!!!  "), "hello-world");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slugify_drops_non_ascii_letters() {
        assert_eq!(slugify("Café Médical"), "caf-m-dical");
    }

    #[test]
    fn test_slugify_is_stable_on_slugs() {
        let slug = slugify("Why Custom Compounding Might Be Right for You");
        assert_eq!(slug, "why-custom-compounding-might-be-right-for-you");
        assert_eq!(slugify(&slug), slug);
    }
}
