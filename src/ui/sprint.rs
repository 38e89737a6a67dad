use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame,
};

use crate::app::App;
use crate::session::Outcome;
use crate::sprint::SprintGame;
use crate::ui::{bold, dim, green_bold, red_bold, render_help, HORIZONTAL_MARGIN};
use crate::util::format_countdown;

pub fn render(app: &App, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(f.area());

    if let Some(game) = &app.sprint {
        f.render_widget(game, chunks[0]);
        render_help("(←) wrong pair  (→) right pair  (esc) menu", chunks[1], f);
    }
}

impl Widget for &SprintGame {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(2)
            .constraints([
                Constraint::Length(2), // countdown
                Constraint::Length(2), // score / streak
                Constraint::Length(4), // the pair
                Constraint::Min(1),    // last-answer feedback
            ])
            .split(area);

        let countdown = Paragraph::new(Span::styled(
            format_countdown(self.seconds_remaining()),
            bold(),
        ))
        .alignment(Alignment::Center);
        countdown.render(chunks[0], buf);

        let tally = Paragraph::new(Line::from(vec![
            Span::styled(format!("Score: {}", self.score), bold()),
            Span::raw("   "),
            Span::styled(format!("Streak: {}", self.streak), dim()),
        ]))
        .alignment(Alignment::Center);
        tally.render(chunks[1], buf);

        if let Some(pair) = &self.current {
            let lines = vec![
                Line::from(Span::styled(pair.word.word.clone(), bold())),
                Line::from(Span::styled(pair.shown_translate.clone(), Style::default())),
            ];
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .render(chunks[2], buf);
        }

        if let Some(outcome) = self.last_outcome {
            let feedback = match outcome {
                Outcome::Correct => Span::styled("✓", green_bold()),
                Outcome::Incorrect => Span::styled("✗", red_bold()),
            };
            Paragraph::new(feedback)
                .alignment(Alignment::Center)
                .render(chunks[3], buf);
        }
    }
}
