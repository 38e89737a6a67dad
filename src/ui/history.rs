use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use time_humanize::{Accuracy, HumanTime, Tense};

use crate::app::App;
use crate::ui::{render_help, HORIZONTAL_MARGIN};

pub fn render(app: &App, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(1)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(f.area());

    let header = Row::new(vec![
        Cell::from("When"),
        Cell::from("Game"),
        Cell::from("Group"),
        Cell::from("Right"),
        Cell::from("Wrong"),
        Cell::from("Score"),
        Cell::from("Streak"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = app
        .history_rows
        .iter()
        .map(|play| {
            let secs = (Local::now() - play.played_at).num_seconds();
            let ago = HumanTime::from(-secs).to_text_en(Accuracy::Rough, Tense::Past);
            Row::new(vec![
                Cell::from(ago),
                Cell::from(play.game.clone()),
                Cell::from((play.group + 1).to_string()),
                Cell::from(play.correct.to_string()),
                Cell::from(play.wrong.to_string()),
                Cell::from(play.score.to_string()),
                Cell::from(play.best_streak.to_string()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        &[
            Constraint::Length(20),
            Constraint::Length(12),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(7),
            Constraint::Length(7),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Recent plays"));
    f.render_widget(table, chunks[0]);

    if app.history_rows.is_empty() {
        let empty = Paragraph::new("No plays recorded yet")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        f.render_widget(empty, chunks[0]);
    }

    render_help("(esc) menu", chunks[1], f);
}
