use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::audiocall::{AudioCallGame, Phase};
use crate::ui::{bold, dim, green_bold, red_bold, render_help, HORIZONTAL_MARGIN};

pub fn render(app: &App, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(f.area());

    if let Some(game) = &app.audiocall {
        f.render_widget(game, chunks[0]);
        let help = match game.phase {
            Phase::AwaitingAnswer => "(1-5) answer  (space) audio  (enter) skip  (esc) menu",
            _ => "(enter) next  (esc) menu",
        };
        render_help(help, chunks[1], f);
    }
}

impl Widget for &AudioCallGame {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(2)
            .constraints([
                Constraint::Length(2), // progress
                Constraint::Length(3), // the word (revealed once answered)
                Constraint::Min(5),    // options
            ])
            .split(area);

        let progress = Paragraph::new(Span::styled(
            format!("{} / {}", self.active_index() + 1, self.total_words()),
            dim(),
        ))
        .alignment(Alignment::Center);
        progress.render(chunks[0], buf);

        let reveal = match (&self.phase, self.active_word()) {
            (Phase::AwaitingAnswer, _) => Line::from(Span::styled("♪ listen ♪", bold())),
            (_, Some(word)) => Line::from(Span::styled(word.word.clone(), green_bold())),
            (_, None) => Line::default(),
        };
        Paragraph::new(reveal)
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        let selected = match self.phase {
            Phase::Answered { selected } => selected,
            _ => None,
        };
        let answered = matches!(self.phase, Phase::Answered { .. });
        let correct_slot = self.correct_slot();

        let max_width = self
            .options
            .iter()
            .map(|opt| opt.word.width())
            .max()
            .unwrap_or(0);

        let lines: Vec<Line> = self
            .options
            .iter()
            .enumerate()
            .map(|(slot, opt)| {
                let style = if answered && Some(slot) == correct_slot {
                    green_bold()
                } else if answered && selected == Some(slot) {
                    // the wrong pick stays highlighted next to the reveal
                    red_bold()
                } else if answered {
                    dim()
                } else {
                    Style::default().fg(Color::White)
                };
                let label = format!(
                    "{}. {:width$}",
                    slot + 1,
                    opt.word,
                    width = max_width
                );
                Line::from(Span::styled(label, style))
            })
            .collect();

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }
}
