//! Read-time estimation for post content.

/// Reading rate used for estimates.
pub const WORDS_PER_MINUTE: usize = 200;

/// Number of whitespace-separated words in the text of an HTML fragment.
///
/// Tags are removed without inserting whitespace, so adjacent blocks such as
/// `<p>one</p><p>two</p>` count as one word. `<script>` and `<style>` bodies are
/// dropped along with their tags and never count.
pub fn word_count(html: &str) -> usize {
    let text = ammonia::Builder::empty().clean(html).to_string();
    text.split_whitespace().count()
}

/// Estimate read time as `"<N> min read"`, rounding up and never below one minute.
pub fn estimate_read_time(html: &str) -> String {
    let minutes = word_count(html).div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{minutes} min read")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_tags_are_not_words() {
        assert_eq!(word_count("<h2>Why</h2>\n<p>It <strong>matters</strong></p>"), 3);
    }

    #[test]
    fn test_adjacent_blocks_merge() {
        assert_eq!(word_count("<p>one</p><p>two</p>"), 1);
        assert_eq!(word_count("<h2>Why</h2><p>It matters</p>"), 2);
    }

    #[test]
    fn test_script_bodies_do_not_count() {
        assert_eq!(word_count("<p>two words</p><script>var a = 1;</script>"), 2);
    }

    #[test]
    fn test_rounds_up() {
        assert_eq!(estimate_read_time(&format!("<p>{}</p>", words(200))), "1 min read");
        assert_eq!(estimate_read_time(&format!("<p>{}</p>", words(201))), "2 min read");
        assert_eq!(estimate_read_time(&words(800)), "4 min read");
    }

    #[test]
    fn test_empty_content_is_one_minute() {
        assert_eq!(estimate_read_time(""), "1 min read");
        assert_eq!(estimate_read_time("<p></p>"), "1 min read");
    }

    #[test]
    fn test_repeatable() {
        let content = format!("<ul><li>{}</li></ul>", words(450));
        assert_eq!(estimate_read_time(&content), estimate_read_time(&content));
    }
}
