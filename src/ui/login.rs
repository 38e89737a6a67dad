use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, LoginField};
use crate::ui::{bold, render_help, HORIZONTAL_MARGIN};

pub fn render(app: &App, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN * 2)
        .vertical_margin(2)
        .constraints([
            Constraint::Length(3), // email
            Constraint::Length(3), // password
            Constraint::Length(2), // error hint
            Constraint::Min(0),
            Constraint::Length(2), // help
        ])
        .split(f.area());

    let email = Paragraph::new(app.login.email.clone()).block(field_block(
        "Email",
        app.login.field == LoginField::Email,
    ));
    f.render_widget(email, chunks[0]);

    let masked = "*".repeat(app.login.password.chars().count());
    let password = Paragraph::new(masked).block(field_block(
        "Password",
        app.login.field == LoginField::Password,
    ));
    f.render_widget(password, chunks[1]);

    if let Some(error) = &app.login.error {
        let hint = Paragraph::new(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )))
        .alignment(Alignment::Center);
        f.render_widget(hint, chunks[2]);
    }

    render_help("(tab) switch field  (enter) sign in  (esc) back", chunks[4], f);
}

fn field_block(title: &str, active: bool) -> Block<'_> {
    let block = Block::default().borders(Borders::ALL).title(title);
    if active {
        block.border_style(bold().fg(Color::Yellow))
    } else {
        block
    }
}
