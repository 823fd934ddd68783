use serde::{Deserialize, Serialize};

/// Topics accepted by the articles service.
pub const TOPICS: [&str; 3] = ["JavaScript", "React", "Node"];

/// An article as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub article_id: i64,
    pub title: String,
    pub text: String,
    pub topic: String,
}

/// Request payload for creating or updating an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDraft {
    pub title: String,
    pub text: String,
    pub topic: String,
}

impl ArticleDraft {
    /// The service rejects drafts with a blank title or text, or a topic
    /// outside the known set. Checked client-side before submitting.
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.text.trim().is_empty()
            && TOPICS.contains(&self.topic.as_str())
    }
}

/// Response envelope for a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub message: String,
}

/// Response envelope for the article list.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticlesResponse {
    pub message: String,
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// Response envelope for create and update operations.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleResponse {
    pub message: String,
    pub article: Article,
}

/// Response envelope carrying only a status message (delete, errors).
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_validation() {
        let draft = ArticleDraft {
            title: "Ownership in practice".to_string(),
            text: "Borrowing rules explained".to_string(),
            topic: "React".to_string(),
        };
        assert!(draft.is_valid());

        let blank_title = ArticleDraft {
            title: "   ".to_string(),
            ..draft.clone()
        };
        assert!(!blank_title.is_valid());

        let blank_text = ArticleDraft {
            text: String::new(),
            ..draft.clone()
        };
        assert!(!blank_text.is_valid());

        let bad_topic = ArticleDraft {
            topic: "Cooking".to_string(),
            ..draft
        };
        assert!(!bad_topic.is_valid());
    }

    #[test]
    fn test_parse_articles_response() {
        let json = r#"{
            "message": "Here are your articles, ed",
            "articles": [
                {"article_id": 1, "title": "HTML", "text": "is cool", "topic": "React"},
                {"article_id": 2, "title": "CSS", "text": "is neat", "topic": "Node"}
            ]
        }"#;

        let resp: ArticlesResponse =
            serde_json::from_str(json).expect("Failed to parse articles test JSON");
        assert_eq!(resp.message, "Here are your articles, ed");
        assert_eq!(resp.articles.len(), 2);
        assert_eq!(resp.articles[0].article_id, 1);
        assert_eq!(resp.articles[1].topic, "Node");
    }

    #[test]
    fn test_parse_articles_response_without_collection() {
        // Some endpoints answer with a bare message; the list defaults empty.
        let resp: ArticlesResponse = serde_json::from_str(r#"{"message": "ok"}"#)
            .expect("Failed to parse bare message JSON");
        assert!(resp.articles.is_empty());
    }

    #[test]
    fn test_parse_login_response() {
        let json = r#"{"token": "ed-0123", "message": "ed is back!"}"#;
        let resp: LoginResponse =
            serde_json::from_str(json).expect("Failed to parse login test JSON");
        assert_eq!(resp.token, "ed-0123");
        assert_eq!(resp.message, "ed is back!");
    }
}
