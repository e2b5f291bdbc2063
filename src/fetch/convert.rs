//! Map parsed RSS channels onto the cached feed model

use crate::core::model::{FeedDocument, FeedEnclosure, FeedGuid, FeedImage, FeedItem};

fn owned(s: Option<&str>) -> Option<String> {
    s.map(str::to_string)
}

fn category_names(categories: &[rss::Category]) -> Vec<String> {
    categories.iter().map(|c| c.name().to_string()).collect()
}

impl From<&rss::Item> for FeedItem {
    fn from(item: &rss::Item) -> Self {
        Self {
            title: owned(item.title()),
            link: owned(item.link()),
            description: owned(item.description()),
            author: owned(item.author()),
            guid: item.guid().map(|g| FeedGuid {
                value: g.value().to_string(),
                permalink: g.is_permalink(),
            }),
            pub_date: owned(item.pub_date()),
            categories: category_names(item.categories()),
            enclosure: item.enclosure().map(|e| FeedEnclosure {
                url: e.url().to_string(),
                length: e.length().to_string(),
                mime_type: e.mime_type().to_string(),
            }),
        }
    }
}

impl From<&rss::Channel> for FeedDocument {
    fn from(channel: &rss::Channel) -> Self {
        Self {
            title: channel.title().to_string(),
            link: channel.link().to_string(),
            description: channel.description().to_string(),
            language: owned(channel.language()),
            pub_date: owned(channel.pub_date()),
            last_build_date: owned(channel.last_build_date()),
            ttl: owned(channel.ttl()),
            image: channel.image().map(|i| FeedImage {
                url: i.url().to_string(),
                title: i.title().to_string(),
                link: i.link().to_string(),
            }),
            categories: category_names(channel.categories()),
            items: channel.items().iter().map(FeedItem::from).collect(),
        }
    }
}

/// Parse an RSS 2.0 document
pub fn parse_rss(bytes: &[u8]) -> Result<FeedDocument, rss::Error> {
    let channel = rss::Channel::read_from(bytes)?;
    Ok(FeedDocument::from(&channel))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Sample Feed</title>
    <link>http://example.com/</link>
    <description>Things happen</description>
    <language>en</language>
    <ttl>30</ttl>
    <category>tech</category>
    <image>
      <url>http://example.com/logo.png</url>
      <title>Sample Feed</title>
      <link>http://example.com/</link>
    </image>
    <item>
      <title>First post</title>
      <link>http://example.com/1</link>
      <guid isPermaLink="false">post-1</guid>
      <pubDate>Mon, 01 Jan 2024 10:00:00 +0000</pubDate>
      <category>rust</category>
      <enclosure url="http://example.com/1.mp3" length="2048" type="audio/mpeg"/>
    </item>
    <item>
      <description>Untitled entry</description>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_channel_fields() {
        let doc = parse_rss(SAMPLE.as_bytes()).unwrap();
        assert_eq!(doc.title, "Sample Feed");
        assert_eq!(doc.link, "http://example.com/");
        assert_eq!(doc.description, "Things happen");
        assert_eq!(doc.language.as_deref(), Some("en"));
        assert_eq!(doc.ttl.as_deref(), Some("30"));
        assert_eq!(doc.categories, vec!["tech"]);
        assert_eq!(
            doc.image.as_ref().map(|i| i.url.as_str()),
            Some("http://example.com/logo.png")
        );
    }

    #[test]
    fn test_parse_items_in_order() {
        let doc = parse_rss(SAMPLE.as_bytes()).unwrap();
        assert_eq!(doc.items.len(), 2);

        let first = &doc.items[0];
        assert_eq!(first.title.as_deref(), Some("First post"));
        assert_eq!(
            first.guid,
            Some(FeedGuid {
                value: "post-1".to_string(),
                permalink: false,
            })
        );
        assert_eq!(first.categories, vec!["rust"]);
        assert_eq!(
            first.enclosure.as_ref().map(|e| e.length.as_str()),
            Some("2048")
        );

        let second = &doc.items[1];
        assert!(second.title.is_none());
        assert_eq!(second.description.as_deref(), Some("Untitled entry"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_rss(b"this is not xml").is_err());
    }
}
