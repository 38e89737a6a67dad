use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::ui::{render_help, HORIZONTAL_MARGIN};

pub fn render(app: &App, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(1)
        .constraints([
            Constraint::Min(3),    // word table
            Constraint::Length(1), // status
            Constraint::Length(2), // help
        ])
        .split(f.area());

    let header = Row::new(vec![Cell::from("Word"), Cell::from("Translation")]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = app
        .browse
        .words
        .iter()
        .map(|w| Row::new(vec![Cell::from(w.word.clone()), Cell::from(w.word_translate.clone())]))
        .collect();

    let title = format!(
        "Textbook - group {} page {}/30",
        app.browse.group + 1,
        app.browse.page + 1
    );
    let table = Table::new(rows, &[Constraint::Percentage(50), Constraint::Percentage(50)])
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, chunks[0]);

    if app.browse.words.is_empty() {
        let empty = Paragraph::new("No words on this page")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        f.render_widget(empty, chunks[0]);
    }

    if let Some(status) = &app.status {
        let line = Paragraph::new(status.clone())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        f.render_widget(line, chunks[1]);
    }

    render_help(
        "(←/→) page  (1-6) group  (a)udio call  (s)print  (esc) menu",
        chunks[2],
        f,
    );
}
