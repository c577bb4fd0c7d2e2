//! Count-up panel.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use odometer_core::CountUp;

use crate::styles::ColorTheme;

/// Render the count-up text with a progress gauge underneath.
pub fn render_count_up(frame: &mut Frame, area: Rect, count_up: &CountUp, theme: &ColorTheme) {
    let title = if count_up.is_complete() {
        " Count-up (done) "
    } else if count_up.has_started() {
        " Count-up "
    } else {
        " Count-up (waiting) "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(theme.border_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let text = Paragraph::new(Line::styled(count_up.display_text(), theme.header_style()))
        .alignment(Alignment::Center);
    frame.render_widget(text, chunks[0]);

    if inner.height >= 2 {
        let gauge = Gauge::default()
            .gauge_style(theme.muted_style())
            .ratio(count_up.progress().clamp(0.0, 1.0))
            .label("");
        frame.render_widget(gauge, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odometer_core::CountUpOptions;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(count_up: &CountUp, width: u16, height: u16) -> ratatui::buffer::Buffer {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_count_up(frame, area, count_up, &ColorTheme::default());
            })
            .unwrap()
            .buffer
            .clone()
    }

    #[test]
    fn waiting_title_before_start() {
        let count_up = CountUp::new(CountUpOptions::to(10.0)).unwrap();
        let buf = draw(&count_up, 40, 5);
        let top: String = (0..buf.area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(top.contains("waiting"));
    }

    #[test]
    fn shows_formatted_text() {
        let mut count_up = CountUp::new(CountUpOptions {
            prefix: "$".into(),
            ..CountUpOptions::to(99.0)
        })
        .unwrap();
        count_up.start();
        count_up.tick(std::time::Duration::from_secs(3));
        let buf = draw(&count_up, 40, 5);
        let row: String = (0..buf.area.width)
            .map(|x| buf[(x, 1)].symbol().to_string())
            .collect();
        assert!(row.contains("$99"));
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let count_up = CountUp::new(CountUpOptions::to(10.0)).unwrap();
        draw(&count_up, 3, 2);
    }
}
