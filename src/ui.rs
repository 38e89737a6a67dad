pub mod audiocall;
pub mod browse;
pub mod history;
pub mod login;
pub mod menu;
pub mod results;
pub mod sprint;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Screen};

pub const HORIZONTAL_MARGIN: u16 = 5;

pub fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

pub fn green_bold() -> Style {
    bold().fg(Color::Green)
}

pub fn red_bold() -> Style {
    bold().fg(Color::Red)
}

/// Dimmed, italic key-help line at the bottom of a screen.
pub fn render_help(text: &str, area: Rect, f: &mut Frame) {
    let help = Paragraph::new(Span::styled(
        text,
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    f.render_widget(help, area);
}

pub fn draw(app: &App, f: &mut Frame) {
    match app.screen {
        Screen::Menu => menu::render(app, f),
        Screen::Login => login::render(app, f),
        Screen::Browse => browse::render(app, f),
        Screen::History => history::render(app, f),
        Screen::AudioCall => audiocall::render(app, f),
        Screen::Sprint => sprint::render(app, f),
        Screen::Results => results::render(app, f),
    }
}
