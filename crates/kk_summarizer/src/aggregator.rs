//! Builds one document out of a batch of articles.

use kk_core::Article;

/// Accessor for one optional text field of an article.
pub type TextField = fn(&Article) -> Option<&str>;

fn content(article: &Article) -> Option<&str> {
    article.content.as_deref()
}

fn description(article: &Article) -> Option<&str> {
    article.description.as_deref()
}

/// Fields tried in order; the first non-blank one is the article's text.
pub const TEXT_FIELDS: [(&str, TextField); 2] = [("content", content), ("description", description)];

/// The text an article contributes, if any.
pub fn article_text(article: &Article) -> Option<&str> {
    TEXT_FIELDS
        .iter()
        .find_map(|(_, field)| field(article).filter(|text| !text.trim().is_empty()))
}

/// Joins the text of every contributing article with single spaces, in article order.
pub fn aggregate(articles: &[Article]) -> String {
    articles
        .iter()
        .filter_map(article_text)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Caps `text` at `max_chars` characters, cutting after the last sentence
/// terminator inside the limit when there is one.
pub fn truncate_text(text: &str, max_chars: usize) -> &str {
    let Some((cut, _)) = text.char_indices().nth(max_chars) else {
        return text;
    };
    let head = &text[..cut];
    match head.rfind(['.', '!', '?']) {
        Some(end) if end > 0 => &head[..=end],
        _ => head,
    }
}
