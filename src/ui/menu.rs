use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::session::GameKind;
use crate::ui::{bold, dim, render_help, HORIZONTAL_MARGIN};

pub fn render(app: &App, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(2)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(2), // greeting
            Constraint::Length(2), // group selector
            Constraint::Length(2), // game selector
            Constraint::Min(1),    // status
            Constraint::Length(2), // help
        ])
        .split(f.area());

    let title = Paragraph::new(Span::styled(
        "vokab",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().borders(Borders::BOTTOM))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let greeting = match &app.credentials {
        Some(creds) if !creds.name.is_empty() => format!("Signed in as {}", creds.name),
        Some(_) => "Signed in".to_string(),
        None => "Not signed in - progress will not be tracked".to_string(),
    };
    f.render_widget(
        Paragraph::new(Span::styled(greeting, dim())).alignment(Alignment::Center),
        chunks[1],
    );

    let groups: Vec<Span> = (0..6)
        .flat_map(|g| {
            let label = format!(" {} ", g + 1);
            let style = if g == app.menu.group {
                bold().fg(Color::Yellow)
            } else {
                dim()
            };
            [Span::styled(label, style)]
        })
        .collect();
    let mut group_line = vec![Span::styled("Group: ", bold())];
    group_line.extend(groups);
    f.render_widget(
        Paragraph::new(Line::from(group_line)).alignment(Alignment::Center),
        chunks[2],
    );

    let game_line = Line::from(vec![
        Span::styled("Game: ", bold()),
        game_span(app, GameKind::AudioCall, "Audio call"),
        Span::raw("   "),
        game_span(app, GameKind::Sprint, "Sprint"),
    ]);
    f.render_widget(
        Paragraph::new(game_line).alignment(Alignment::Center),
        chunks[3],
    );

    if let Some(status) = &app.status {
        f.render_widget(
            Paragraph::new(Span::styled(
                status.clone(),
                Style::default().fg(Color::Red),
            ))
            .alignment(Alignment::Center),
            chunks[4],
        );
    }

    render_help(
        "(1-6) group  (tab) game  (enter) play  (b)rowse  (h)istory  (l)ogin  (x) sign out  (esc) quit",
        chunks[5],
        f,
    );
}

fn game_span(app: &App, kind: GameKind, label: &str) -> Span<'static> {
    let style = if app.menu.game == kind {
        bold().fg(Color::Yellow)
    } else {
        dim()
    };
    Span::styled(label.to_string(), style)
}
