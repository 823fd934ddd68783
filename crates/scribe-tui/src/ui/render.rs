//! Rendering for the TUI screens.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppState, Focus, FormFocus, LoginFocus, Screen};
use scribe_core::models::TOPICS;

use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);

    match app.screen {
        Screen::Login => render_login(frame, app, chunks[1]),
        Screen::Articles => render_articles(frame, app, chunks[1]),
    }

    render_status_bar(frame, app, chunks[2]);

    if matches!(app.state, AppState::ConfirmingDelete) {
        render_delete_overlay(frame, app);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Scribe";
    let hint = match app.screen {
        Screen::Login => "[Esc] Quit",
        Screen::Articles => "[q] Quit",
    };

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub(title.len() as u16 + hint.len() as u16 + 4) as usize,
        )),
        Span::styled(hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_login(frame: &mut Frame, app: &App, area: Rect) {
    let popup = centered_rect(50, 11, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Username
            Constraint::Length(3), // Password
            Constraint::Length(2), // Hint
        ])
        .split(popup);

    let username = Paragraph::new(app.username_input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Username ")
            .border_style(styles::border_style(matches!(
                app.login_focus,
                LoginFocus::Username
            ))),
    );
    frame.render_widget(username, rows[0]);

    let masked = "*".repeat(app.password_input.chars().count());
    let password = Paragraph::new(masked).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Password ")
            .border_style(styles::border_style(matches!(
                app.login_focus,
                LoginFocus::Password
            ))),
    );
    frame.render_widget(password, rows[1]);

    let hint = if app.can_submit_login() {
        Line::from(Span::styled("[Enter] Sign in", styles::highlight_style()))
    } else {
        Line::from(Span::styled(
            "Username: 3+ chars, password: 8+ chars",
            styles::muted_style(),
        ))
    };
    frame.render_widget(Paragraph::new(hint), rows[2]);
}

fn render_articles(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_article_list(frame, app, columns[0]);
    render_article_form(frame, app, columns[1]);
}

fn render_article_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .articles
        .iter()
        .map(|article| {
            ListItem::new(Line::from(vec![
                Span::styled(article.title.clone(), styles::list_item_style()),
                Span::raw("  "),
                Span::styled(format!("[{}]", article.topic), styles::muted_style()),
            ]))
        })
        .collect();

    let count = app.articles.len();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Articles ({}) ", count))
                .border_style(styles::border_style(matches!(app.focus, Focus::List))),
        )
        .highlight_style(styles::selected_style());

    let mut state = ListState::default();
    if !app.articles.is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_article_form(frame: &mut Frame, app: &App, area: Rect) {
    let form_focused = matches!(app.focus, Focus::Form);
    let title = match app.editing_id {
        Some(id) => format!(" Edit Article #{} ", id),
        None => " New Article ".to_string(),
    };

    let outer = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(styles::border_style(form_focused));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(4),    // Text
            Constraint::Length(3), // Topic
            Constraint::Length(1), // Hint
        ])
        .split(inner);

    let field_focused =
        |field: FormFocus| form_focused && app.form_focus == field;

    let title_field = Paragraph::new(app.title_input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Title ")
            .border_style(styles::border_style(field_focused(FormFocus::Title))),
    );
    frame.render_widget(title_field, rows[0]);

    let text_field = Paragraph::new(app.text_input.as_str())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Text ")
                .border_style(styles::border_style(field_focused(FormFocus::Text))),
        );
    frame.render_widget(text_field, rows[1]);

    let topic_line = Line::from(vec![
        Span::styled("< ", styles::muted_style()),
        Span::styled(TOPICS[app.topic_index], styles::highlight_style()),
        Span::styled(" >", styles::muted_style()),
    ]);
    let topic_field = Paragraph::new(topic_line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Topic ")
            .border_style(styles::border_style(field_focused(FormFocus::Topic))),
    );
    frame.render_widget(topic_field, rows[2]);

    let hint = if form_focused {
        "[Enter] save | [Tab] next field | [Esc] cancel"
    } else {
        "[Tab] edit form"
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hint, styles::muted_style())),
        rows[3],
    );
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.screen {
        Screen::Login => "[Tab] switch field | [Enter] sign in",
        Screen::Articles => "[r]efresh | [n]ew | [e]dit | [d]elete | [l]ogout",
    };

    let left_text = if app.spinner_on {
        " Please wait... ".to_string()
    } else if let Some(ref msg) = app.message {
        format!(" {} ", msg)
    } else {
        String::new()
    };

    let left_style = if app.spinner_on {
        styles::highlight_style()
    } else {
        styles::status_bar_style()
    };

    let line = Line::from(vec![
        Span::styled(left_text.clone(), left_style),
        Span::raw(" ".repeat(
            (area.width as usize).saturating_sub(left_text.len() + shortcuts.len() + 2),
        )),
        Span::styled(shortcuts, styles::muted_style()),
    ]);

    frame.render_widget(
        Paragraph::new(line).style(styles::status_bar_style()),
        area,
    );
}

fn render_delete_overlay(frame: &mut Frame, app: &App) {
    let title = app
        .selected_article()
        .map(|a| a.title.clone())
        .unwrap_or_default();

    let popup = centered_rect(50, 5, frame.area());
    frame.render_widget(Clear, popup);

    let text = vec![
        Line::from(format!("Delete \"{}\"?", title)),
        Line::from(Span::styled("[y]es / [n]o", styles::muted_style())),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Confirm delete ")
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(text).block(block), popup);
}

/// Center a fixed-height, percentage-width rectangle inside `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
