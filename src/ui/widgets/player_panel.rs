//! Player information panel widget.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::audio::TrackMetadata;

/// Snapshot of player state needed to draw the panel.
#[derive(Debug, Clone, Copy)]
pub struct PlayerView<'a> {
    pub metadata: Option<&'a TrackMetadata>,
    pub elapsed_secs: u64,
    pub duration_secs: u64,
    pub is_playing: bool,
    pub is_paused: bool,
    pub volume: f32,
}

/// `mm:ss`
pub fn format_time(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Render the player information panel.
pub fn render_player_panel(f: &mut Frame<'_>, area: Rect, view: PlayerView<'_>) {
    f.render_widget(Block::default().borders(Borders::ALL).title("2: Player"), area);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    let text = match view.metadata {
        Some(meta) => {
            let mut lines = vec![Line::from(Span::styled(
                meta.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ))];
            if let Some(artist) = &meta.artist {
                lines.push(Line::from(format!("Artist: {}", artist)));
            }
            if let Some(album) = &meta.album {
                lines.push(Line::from(format!("Album: {}", album)));
            }
            lines.push(Line::from(format!("Length: {}", format_time(meta.duration_secs))));
            for (k, v) in &meta.properties {
                lines.push(Line::from(format!("{}: {}", k, v)));
            }
            lines
        }
        None => vec![Line::from("No track playing")],
    };
    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), inner[0]);

    let play_pause_icon = if !view.is_playing {
        Span::styled(" ⏵ ", Style::default().fg(Color::Gray))
    } else if view.is_paused {
        Span::styled(" ⏵ ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" ⏸ ", Style::default().fg(Color::Green))
    };

    let controls = Line::from(vec![
        Span::styled(" ⏮ ", Style::default().fg(Color::Cyan)),
        Span::raw(" "),
        Span::styled(" ⏹ ", Style::default().fg(Color::Red)),
        Span::raw(" "),
        play_pause_icon,
        Span::raw(" "),
        Span::styled(" ⏭ ", Style::default().fg(Color::Cyan)),
        Span::raw(format!("   vol {:>3.0}%", view.volume * 100.0)),
    ]);
    f.render_widget(Paragraph::new(controls).alignment(Alignment::Center), inner[1]);

    let duration = view.duration_secs.max(1);
    let ratio = (view.elapsed_secs as f64 / duration as f64).clamp(0.0, 1.0);
    let label = format!(
        "{} / {}",
        format_time(view.elapsed_secs),
        format_time(view.duration_secs)
    );
    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::ITALIC))
            .ratio(ratio)
            .label(label),
        inner[2],
    );
}
