use itertools::Itertools;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::session::GameKind;
use crate::ui::{bold, green_bold, red_bold, render_help, HORIZONTAL_MARGIN};
use crate::util::percent;

pub fn render(app: &App, f: &mut Frame) {
    let Some(summary) = &app.results else { return };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(2)
        .constraints([
            Constraint::Length(3), // headline
            Constraint::Length(2), // tallies
            Constraint::Min(4),    // word lists
            Constraint::Length(2), // help
        ])
        .split(f.area());

    let headline = match summary.game {
        GameKind::Sprint => format!(
            "Sprint over - score {} - best streak {}",
            summary.score, summary.best_streak
        ),
        GameKind::AudioCall => format!(
            "Round over - {}% accuracy",
            percent(summary.correct, summary.total)
        ),
    };
    f.render_widget(
        Paragraph::new(Span::styled(
            headline,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        chunks[0],
    );

    let tallies = Line::from(vec![
        Span::styled(format!("{} right", summary.correct), green_bold()),
        Span::styled("  /  ", bold()),
        Span::styled(format!("{} wrong", summary.wrong), red_bold()),
    ]);
    f.render_widget(
        Paragraph::new(tallies).alignment(Alignment::Center),
        chunks[1],
    );

    if let Some(log) = &app.results_log {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);

        let correct_words = log
            .correct
            .iter()
            .map(|w| format!("{} - {}", w.word, w.word_translate))
            .join("\n");
        f.render_widget(
            Paragraph::new(correct_words)
                .block(Block::default().borders(Borders::ALL).title("I knew"))
                .style(Style::default().fg(Color::Green))
                .wrap(Wrap { trim: true }),
            halves[0],
        );

        let wrong_words = log
            .incorrect
            .iter()
            .map(|w| format!("{} - {}", w.word, w.word_translate))
            .join("\n");
        f.render_widget(
            Paragraph::new(wrong_words)
                .block(Block::default().borders(Borders::ALL).title("To repeat"))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true }),
            halves[1],
        );
    }

    render_help("(r) play again  (esc) menu", chunks[3], f);
}
