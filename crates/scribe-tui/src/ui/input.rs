//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes. API calls are not performed here: handlers
//! queue a request on the `App` and the event loop runs it after drawing
//! a frame with the busy indicator up.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, AppState, Focus, FormFocus, LoginFocus, Screen};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle delete confirmation
    if matches!(app.state, AppState::ConfirmingDelete) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Normal;
                app.queue_delete();
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    match app.screen {
        Screen::Login => handle_login_input(app, key),
        Screen::Articles => handle_articles_input(app, key),
    }
}

fn handle_login_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => return Ok(true),
        KeyCode::Tab | KeyCode::Down | KeyCode::Up => {
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Password,
                LoginFocus::Password => LoginFocus::Username,
            };
        }
        KeyCode::Enter => app.queue_login(),
        KeyCode::Backspace => match app.login_focus {
            LoginFocus::Username => {
                app.username_input.pop();
            }
            LoginFocus::Password => {
                app.password_input.pop();
            }
        },
        KeyCode::Char(c) => match app.login_focus {
            LoginFocus::Username => {
                if app.can_add_username_char() {
                    app.username_input.push(c);
                }
            }
            LoginFocus::Password => {
                if app.can_add_password_char() {
                    app.password_input.push(c);
                }
            }
        },
        _ => {}
    }
    Ok(false)
}

fn handle_articles_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.focus {
        Focus::Form => handle_form_input(app, key),
        Focus::List => handle_list_input(app, key),
    }
}

fn handle_list_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Char('r') => app.queue_fetch(),
        KeyCode::Char('n') => app.start_create(),
        KeyCode::Char('e') | KeyCode::Enter => app.start_edit(),
        KeyCode::Char('d') => {
            if app.selected_article().is_some() {
                app.state = AppState::ConfirmingDelete;
            }
        }
        KeyCode::Char('l') => app.logout(),
        KeyCode::Tab => app.focus = Focus::Form,
        _ => {}
    }
    Ok(false)
}

fn handle_form_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Tab | KeyCode::Down => {
            app.form_focus = match app.form_focus {
                FormFocus::Title => FormFocus::Text,
                FormFocus::Text => FormFocus::Topic,
                FormFocus::Topic => FormFocus::Title,
            };
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.form_focus = match app.form_focus {
                FormFocus::Title => FormFocus::Topic,
                FormFocus::Text => FormFocus::Title,
                FormFocus::Topic => FormFocus::Text,
            };
        }
        KeyCode::Enter => app.queue_submit(),
        KeyCode::Left => {
            if matches!(app.form_focus, FormFocus::Topic) {
                app.prev_topic();
            }
        }
        KeyCode::Right => {
            if matches!(app.form_focus, FormFocus::Topic) {
                app.next_topic();
            }
        }
        KeyCode::Backspace => match app.form_focus {
            FormFocus::Title => {
                app.title_input.pop();
            }
            FormFocus::Text => {
                app.text_input.pop();
            }
            FormFocus::Topic => {}
        },
        KeyCode::Char(c) => match app.form_focus {
            FormFocus::Title => {
                if app.can_add_title_char() {
                    app.title_input.push(c);
                }
            }
            FormFocus::Text => {
                if app.can_add_text_char() {
                    app.text_input.push(c);
                }
            }
            FormFocus::Topic => match c {
                'h' => app.prev_topic(),
                'l' | ' ' => app.next_topic(),
                _ => {}
            },
        },
        _ => {}
    }
    Ok(false)
}
