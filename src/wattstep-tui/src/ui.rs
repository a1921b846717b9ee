//! Frame rendering for the onboarding wizard.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::App;

pub const BACKGROUND: Color = Color::Rgb(10, 22, 40); // #0A1628
pub const TEXT: Color = Color::Rgb(255, 255, 255);
pub const TEXT_DIM: Color = Color::Rgb(130, 154, 177); // #829AB1
pub const ACCENT: Color = Color::Rgb(0, 255, 163); // #00FFA3
pub const BORDER: Color = Color::Rgb(27, 73, 101); // #1B4965

/// Draws the whole wizard for the frame at `now`.
pub fn render(app: &App, frame: &mut Frame, now: Instant) {
    let area = frame.area();
    frame.render_widget(Clear, area);
    frame.render_widget(
        Block::default().style(Style::default().bg(BACKGROUND)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Progress
            Constraint::Length(1), // Spacer
            Constraint::Min(5),    // Step card
            Constraint::Length(1), // Key help
        ])
        .split(area);

    render_progress(app, frame, chunks[0]);
    render_step(app, frame, chunks[2], now);
    render_help(app, frame, chunks[3]);
}

/// One dot per step; the selected step is highlighted even while the
/// previous one is still fading out.
fn render_progress(app: &App, frame: &mut Frame, area: Rect) {
    let wizard = app.wizard();
    let mut spans = Vec::with_capacity(wizard.len() * 2 + 1);
    for index in 0..wizard.len() {
        let style = if index == wizard.index() {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_DIM)
        };
        spans.push(Span::styled(if index == wizard.index() { "●" } else { "○" }, style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        format!(" Step {} of {}", wizard.index() + 1, wizard.len()),
        Style::default().fg(TEXT_DIM),
    ));
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn render_step(app: &App, frame: &mut Frame, area: Rect, now: Instant) {
    let hints = app.hints(now);
    let card = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER));
    let inner = card.inner(area);
    frame.render_widget(card, area);

    let Some(content) = app.displayed_content() else {
        return;
    };

    // Slide: the content starts a little lower and rises as it fades in.
    let slide = hints.slide_rows.min(inner.height);
    let body_area = Rect {
        y: inner.y + slide,
        height: inner.height - slide,
        ..inner
    };

    let title_style = Style::default()
        .fg(hints.blend(BACKGROUND, ACCENT))
        .add_modifier(Modifier::BOLD);
    let body_style = Style::default().fg(hints.blend(BACKGROUND, TEXT));

    let mut lines = vec![Line::styled(content.title.clone(), title_style), Line::raw("")];
    lines.extend(
        content
            .body
            .lines()
            .map(|line| Line::styled(line.to_string(), body_style)),
    );

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        body_area,
    );
}

/// Key help; an arrow is dimmed when it has nowhere to go.
fn render_help(app: &App, frame: &mut Frame, area: Rect) {
    let wizard = app.wizard();
    let arrow = |blocked: bool| Style::default().fg(if blocked { TEXT_DIM } else { ACCENT });
    let help = Line::from(vec![
        Span::styled("←", arrow(wizard.is_first())),
        Span::styled("/", Style::default().fg(TEXT_DIM)),
        Span::styled("→", arrow(wizard.is_last())),
        Span::styled(" navigate  ", Style::default().fg(TEXT_DIM)),
        Span::styled("1-9", Style::default().fg(ACCENT)),
        Span::styled(" jump  ", Style::default().fg(TEXT_DIM)),
        Span::styled("q", Style::default().fg(ACCENT)),
        Span::styled(" quit", Style::default().fg(TEXT_DIM)),
    ]);
    frame.render_widget(Paragraph::new(help).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::NavAction;
    use crate::config::HostConfig;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
    use std::time::Duration;

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn draw(app: &App, now: Instant) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
        terminal.draw(|f| render(app, f, now)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn title_color(buffer: &Buffer, title: &str) -> Option<Color> {
        let area = buffer.area;
        let first = title.chars().next()?.to_string();
        for y in area.top()..area.bottom() {
            let row: String = (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect();
            if let Some(col) = row.find(title) {
                let x = area.left() + row[..col].chars().count() as u16;
                let cell = &buffer[(x, y)];
                if cell.symbol() == first {
                    return Some(cell.fg);
                }
            }
        }
        None
    }

    fn symbol_color(buffer: &Buffer, symbol: &str) -> Option<Color> {
        let area = buffer.area;
        (area.top()..area.bottom())
            .flat_map(|y| (area.left()..area.right()).map(move |x| (x, y)))
            .map(|pos| &buffer[pos])
            .find(|cell| cell.symbol() == symbol)
            .map(|cell| cell.fg)
    }

    #[test]
    fn test_help_dims_arrow_at_either_end() {
        let t0 = Instant::now();
        let mut app = App::new(&HostConfig::default(), 0, t0);

        let first = draw(&app, t0);
        assert_eq!(symbol_color(&first, "←"), Some(TEXT_DIM));
        assert_eq!(symbol_color(&first, "→"), Some(ACCENT));

        app.apply(NavAction::Jump(2), t0);
        let middle = draw(&app, t0);
        assert_eq!(symbol_color(&middle, "←"), Some(ACCENT));
        assert_eq!(symbol_color(&middle, "→"), Some(ACCENT));

        app.apply(NavAction::Last, t0);
        let last = draw(&app, t0);
        assert_eq!(symbol_color(&last, "←"), Some(ACCENT));
        assert_eq!(symbol_color(&last, "→"), Some(TEXT_DIM));
    }

    #[test]
    fn test_renders_displayed_step_and_progress() {
        let t0 = Instant::now();
        let mut app = App::new(&HostConfig::default(), 0, t0);
        app.tick(t0 + Duration::from_millis(50));

        let text = buffer_text(&draw(&app, t0 + Duration::from_millis(500)));
        assert!(text.contains("Welcome"));
        assert!(text.contains("Step 1 of 5"));
        assert!(text.contains("quit"));
    }

    #[test]
    fn test_old_step_stays_rendered_during_fade_out() {
        let t0 = Instant::now();
        let mut app = App::new(&HostConfig::default(), 0, t0);
        app.tick(t0 + Duration::from_millis(50));
        app.apply(NavAction::Next, t0 + Duration::from_millis(500));

        let text = buffer_text(&draw(&app, t0 + Duration::from_millis(550)));
        assert!(text.contains("Welcome"));
        assert!(!text.contains("Connect your meter"));
        // Progress already points at the selected step.
        assert!(text.contains("Step 2 of 5"));
    }

    #[test]
    fn test_title_color_fades_with_opacity() {
        let t0 = Instant::now();
        let mut app = App::new(&HostConfig::default(), 0, t0);
        app.tick(t0 + Duration::from_millis(50));

        let settled = draw(&app, t0 + Duration::from_millis(500));
        assert_eq!(title_color(&settled, "Welcome"), Some(ACCENT));

        app.apply(NavAction::Next, t0 + Duration::from_millis(500));
        let fading = draw(&app, t0 + Duration::from_millis(600));
        let color = title_color(&fading, "Welcome");
        assert!(color.is_some());
        assert_ne!(color, Some(ACCENT));
    }
}
