//! Domain models and API response envelopes for the articles service.

pub mod article;

pub use article::{
    Article, ArticleDraft, ArticleResponse, ArticlesResponse, LoginResponse, MessageResponse,
    TOPICS,
};
