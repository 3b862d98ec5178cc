//! Storage-to-wire mapping for posts.

use chrono::{DateTime, SecondsFormat, Utc};
use scribe_core::domain::Post;
use scribe_shared::dto::PostResponse;

/// Canonical wire form of a timestamp: RFC 3339, UTC, millisecond precision.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serialize a stored post, flattening the author to `"First Last"`.
pub fn post_response(post: &Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        author: post.author.full_name(),
        title: post.title.clone(),
        content: post.content.clone(),
        created: format_timestamp(&post.created),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use scribe_core::domain::{Author, NewPost};

    #[test]
    fn test_post_response_flattens_author() {
        let created = Utc.with_ymd_and_hms(2017, 3, 1, 12, 34, 56).unwrap();
        let post = Post::create(
            NewPost::new(Author::new("Jane", "Austen").unwrap(), "Emma", "...")
                .created_at(created),
        );

        let res = post_response(&post);

        assert_eq!(res.id, post.id.to_string());
        assert_eq!(res.author, "Jane Austen");
        assert_eq!(res.title, "Emma");
        assert_eq!(res.content, "...");
        assert_eq!(res.created, "2017-03-01T12:34:56.000Z");
    }

    #[test]
    fn test_wire_keys() {
        let post = Post::create(NewPost::new(Author::new("A", "B").unwrap(), "t", "c"));
        let json = serde_json::to_value(post_response(&post)).unwrap();

        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["author", "content", "created", "id", "title"]);
    }

    #[test]
    fn test_timestamp_round_trips_at_millisecond_precision() {
        let ts: DateTime<Utc> = "2020-02-29T23:59:59.123456Z".parse().unwrap();
        let wire = format_timestamp(&ts);

        assert_eq!(wire, "2020-02-29T23:59:59.123Z");
        let parsed: DateTime<Utc> = wire.parse().unwrap();
        assert_eq!(parsed.timestamp(), ts.timestamp());
    }
}
