//! News feed entries.

use serde::{Deserialize, Serialize};

/// A single entry of the news feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    #[serde(rename = "image", alias = "imageUrl")]
    pub image_url: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_feed_keeps_order() {
        let json = r#"[
            {"id":"2","title":"Second","image":"b.png","content":"later"},
            {"id":"1","title":"First","imageUrl":"a.png","content":"earlier"}
        ]"#;
        let items: Vec<NewsItem> = serde_json::from_str(json).unwrap();
        let ids: Vec<_> = items.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["2", "1"]);
        assert_eq!(items[1].image_url, "a.png");
    }

    #[test]
    fn parse_empty_feed() {
        let items: Vec<NewsItem> = serde_json::from_str("[]").unwrap();
        assert!(items.is_empty());
    }
}
