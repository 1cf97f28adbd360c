//! Records returned by the posts API.

use serde::{Deserialize, Serialize};

/// A blog post.
///
/// Deserialized verbatim from `GET /posts` and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

/// A comment attached to exactly one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub post_id: u64,
    pub name: String,
    pub body: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_uses_camel_case_wire_names() {
        let json = r#"{"userId": 1, "id": 7, "title": "qui est esse", "body": "est rerum"}"#;
        let post: Post = serde_json::from_str(json).unwrap();

        assert_eq!(post.id, 7);
        assert_eq!(post.user_id, 1);
        assert_eq!(post.title, "qui est esse");

        let back = serde_json::to_value(&post).unwrap();
        assert_eq!(back["userId"], 1);
    }

    #[test]
    fn test_comment_array_parses() {
        let json = r#"[
            {"postId": 1, "id": 1, "name": "id labore", "email": "Eliseo@gardner.biz", "body": "laudantium"},
            {"postId": 1, "id": 2, "name": "quo vero", "email": "Jayne_Kuhic@sydney.com", "body": "est natus"}
        ]"#;
        let comments: Vec<Comment> = serde_json::from_str(json).unwrap();

        assert_eq!(comments.len(), 2);
        assert_eq!(comments[1].post_id, 1);
        assert_eq!(comments[1].email, "Jayne_Kuhic@sydney.com");
    }

    #[test]
    fn test_post_missing_field_is_error() {
        let json = r#"{"id": 1, "title": "no body"}"#;
        assert!(serde_json::from_str::<Post>(json).is_err());
    }
}
