//! Application state management for scribe.
//!
//! This module contains the core `App` struct that manages all application
//! state: the current screen, form inputs, the article list, the status
//! message and spinner, and the session context. Every request handler
//! follows the same shape: clear the message, raise the spinner, await the
//! call, reduce the outcome to UI state.

use anyhow::Result;
use tracing::{error, warn};

use scribe_core::api::{self, ApiClient};
use scribe_core::auth::{FileTokenStore, Session};
use scribe_core::config::Config;
use scribe_core::models::{Article, ArticleDraft, TOPICS};

// ============================================================================
// Constants
// ============================================================================

/// Minimum trimmed username length accepted by the service.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Minimum trimmed password length accepted by the service.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum length for username input.
/// Usernames are typically short handles, 50 chars covers most.
const MAX_USERNAME_LENGTH: usize = 50;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length for article title input.
const MAX_TITLE_LENGTH: usize = 100;

/// Maximum length for article text input.
const MAX_TEXT_LENGTH: usize = 500;

// ============================================================================
// UI State Types
// ============================================================================

/// Top-level screens, mirroring the login/articles navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Articles,
}

/// Focused field on the login screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Username,
    Password,
}

/// Focused area on the articles screen (list panel or editor form)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Form,
}

/// Focused field in the article editor form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Title,
    Text,
    Topic,
}

/// Modal application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ConfirmingDelete,
}

/// A queued API request. Input handlers queue one; the event loop draws a
/// frame with the busy indicator up, then runs it to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Login,
    FetchArticles,
    SubmitArticle,
    DeleteSelected,
}

pub struct App {
    pub screen: Screen,
    pub state: AppState,
    pub message: Option<String>,
    pub spinner_on: bool,
    pending: Option<Request>,

    pub articles: Vec<Article>,
    pub selected: usize,
    /// Article currently loaded into the form for editing, if any
    pub editing_id: Option<i64>,
    pub focus: Focus,

    // Login form
    pub login_focus: LoginFocus,
    pub username_input: String,
    pub password_input: String,

    // Article form
    pub form_focus: FormFocus,
    pub title_input: String,
    pub text_input: String,
    pub topic_index: usize,

    pub session: Session,
    client: ApiClient,
    config: Config,
}

impl App {
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        let cache_dir = config.cache_dir()?;
        let session = Session::new(Box::new(FileTokenStore::new(cache_dir)));
        Self::with_session(config, session)
    }

    /// Build an app around an explicit session context.
    /// Tests inject an in-memory store and a mock server URL here.
    pub fn with_session(config: Config, session: Session) -> Result<Self> {
        let client = ApiClient::new(config.api_url())?;
        let screen = if session.is_logged_in() {
            Screen::Articles
        } else {
            Screen::Login
        };
        let username_input = config.last_username.clone().unwrap_or_default();

        Ok(Self {
            screen,
            state: AppState::Normal,
            message: None,
            spinner_on: false,
            pending: None,
            articles: Vec::new(),
            selected: 0,
            editing_id: None,
            focus: Focus::List,
            login_focus: LoginFocus::Username,
            username_input,
            password_input: String::new(),
            form_focus: FormFocus::Title,
            title_input: String::new(),
            text_input: String::new(),
            topic_index: 0,
            session,
            client,
            config,
        })
    }

    /// The request factory: an API client carrying the store's current token,
    /// or an unauthenticated one when no token is present.
    fn authed(&self) -> ApiClient {
        match self.session.token() {
            Some(token) => self.client.with_token(token),
            None => self.client.clone(),
        }
    }

    /// Reduce a failed request to UI state. An unauthorized response forces
    /// the logged-out transition and drops the stored token; everything else
    /// becomes the status message.
    fn fail(&mut self, err: anyhow::Error) {
        error!(error = %err, "API request failed");
        if api::unauthorized(&err) {
            self.session.logout();
            self.articles.clear();
            self.clear_form();
            self.editing_id = None;
            self.screen = Screen::Login;
            self.message = Some("Session expired, please log in again".to_string());
        } else {
            self.message = Some(err.to_string());
        }
    }

    // ===== Request queue =====

    /// Queue a login attempt, or surface the validation hint.
    pub fn queue_login(&mut self) {
        if !self.can_submit_login() {
            self.message = Some(format!(
                "Username must be at least {} characters, password at least {}",
                MIN_USERNAME_LENGTH, MIN_PASSWORD_LENGTH
            ));
            return;
        }
        self.begin(Request::Login);
    }

    pub fn queue_fetch(&mut self) {
        self.begin(Request::FetchArticles);
    }

    /// Queue a create or update, or surface the validation hint.
    pub fn queue_submit(&mut self) {
        if !self.can_submit_article() {
            self.message = Some("Title and text are both required".to_string());
            return;
        }
        self.begin(Request::SubmitArticle);
    }

    pub fn queue_delete(&mut self) {
        if self.selected_article().is_some() {
            self.begin(Request::DeleteSelected);
        }
    }

    fn begin(&mut self, request: Request) {
        self.message = None;
        self.spinner_on = true;
        self.pending = Some(request);
    }

    pub fn take_pending(&mut self) -> Option<Request> {
        self.pending.take()
    }

    /// Run a queued request to completion, then drop the busy indicator.
    pub async fn run(&mut self, request: Request) {
        match request {
            Request::Login => self.login().await,
            Request::FetchArticles => {
                self.fetch_articles().await;
            }
            Request::SubmitArticle => self.submit_article().await,
            Request::DeleteSelected => self.delete_selected().await,
        }
        self.spinner_on = false;
    }

    // ===== Login screen =====

    pub fn can_submit_login(&self) -> bool {
        self.username_input.trim().len() >= MIN_USERNAME_LENGTH
            && self.password_input.trim().len() >= MIN_PASSWORD_LENGTH
    }

    pub fn can_add_username_char(&self) -> bool {
        self.username_input.len() < MAX_USERNAME_LENGTH
    }

    pub fn can_add_password_char(&self) -> bool {
        self.password_input.len() < MAX_PASSWORD_LENGTH
    }

    pub async fn login(&mut self) {
        let username = self.username_input.trim().to_string();
        let password = self.password_input.trim().to_string();

        match self.client.login(&username, &password).await {
            Ok(resp) => {
                self.session.login(resp.token);
                self.password_input.clear();
                self.screen = Screen::Articles;
                self.focus = Focus::List;

                self.config.last_username = Some(username);
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }

                self.fetch_articles().await;
            }
            Err(e) => self.fail(e),
        }
    }

    /// Clear the credential and return to the login screen. Says goodbye
    /// only when a token was actually present; a redundant logout is silent.
    pub fn logout(&mut self) {
        if self.session.logout() {
            self.message = Some("Goodbye!".to_string());
        }
        self.screen = Screen::Login;
        self.state = AppState::Normal;
        self.password_input.clear();
        self.articles.clear();
        self.editing_id = None;
        self.clear_form();
    }

    // ===== Articles screen =====

    /// Refresh the article list. Returns whether the fetch succeeded, so
    /// callers that re-fetch after a write know whose message to keep.
    pub async fn fetch_articles(&mut self) -> bool {
        match self.authed().fetch_articles().await {
            Ok(resp) => {
                self.articles = resp.articles;
                if self.selected >= self.articles.len() {
                    self.selected = self.articles.len().saturating_sub(1);
                }
                self.message = Some(resp.message);
                true
            }
            Err(e) => {
                self.fail(e);
                false
            }
        }
    }

    pub fn draft(&self) -> ArticleDraft {
        ArticleDraft {
            title: self.title_input.trim().to_string(),
            text: self.text_input.trim().to_string(),
            topic: TOPICS[self.topic_index].to_string(),
        }
    }

    pub fn can_submit_article(&self) -> bool {
        self.draft().is_valid()
    }

    /// Create or update, depending on whether an article is loaded for edit.
    /// On success the list is re-fetched; the operation's own message wins
    /// only when the re-fetch also succeeded.
    pub async fn submit_article(&mut self) {
        let draft = self.draft();

        let result = match self.editing_id {
            Some(id) => self.authed().update_article(id, &draft).await,
            None => self.authed().create_article(&draft).await,
        };

        match result {
            Ok(resp) => {
                self.editing_id = None;
                self.clear_form();
                self.focus = Focus::List;
                if self.fetch_articles().await {
                    self.message = Some(resp.message);
                }
            }
            Err(e) => self.fail(e),
        }
    }

    pub async fn delete_selected(&mut self) {
        let Some(id) = self.selected_article().map(|a| a.article_id) else {
            return;
        };

        match self.authed().delete_article(id).await {
            Ok(resp) => {
                if self.editing_id == Some(id) {
                    self.editing_id = None;
                    self.clear_form();
                }
                if self.fetch_articles().await {
                    self.message = Some(resp.message);
                }
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.articles.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.articles.is_empty() && self.selected + 1 < self.articles.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Load the selected article into the form for editing.
    pub fn start_edit(&mut self) {
        let Some(article) = self.selected_article().cloned() else {
            return;
        };
        self.editing_id = Some(article.article_id);
        self.title_input = article.title;
        self.text_input = article.text;
        self.topic_index = TOPICS
            .iter()
            .position(|t| *t == article.topic)
            .unwrap_or(0);
        self.form_focus = FormFocus::Title;
        self.focus = Focus::Form;
    }

    /// Open an empty form for a new article.
    pub fn start_create(&mut self) {
        self.editing_id = None;
        self.clear_form();
        self.focus = Focus::Form;
    }

    pub fn cancel_edit(&mut self) {
        self.editing_id = None;
        self.clear_form();
        self.focus = Focus::List;
    }

    pub fn clear_form(&mut self) {
        self.title_input.clear();
        self.text_input.clear();
        self.topic_index = 0;
        self.form_focus = FormFocus::Title;
    }

    pub fn can_add_title_char(&self) -> bool {
        self.title_input.len() < MAX_TITLE_LENGTH
    }

    pub fn can_add_text_char(&self) -> bool {
        self.text_input.len() < MAX_TEXT_LENGTH
    }

    pub fn next_topic(&mut self) {
        self.topic_index = (self.topic_index + 1) % TOPICS.len();
    }

    pub fn prev_topic(&mut self) {
        self.topic_index = (self.topic_index + TOPICS.len() - 1) % TOPICS.len();
    }
}
