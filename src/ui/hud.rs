use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;

/// Height of the HUD row above the board.
pub const HUD_HEIGHT: u16 = 1;

/// Draws `Length` on the left and `Score` on the right of the HUD row.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, score: u32, length: usize, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(hud_line(score, length, usize::from(area.width), theme))
            .alignment(Alignment::Right),
        area,
    );
}

/// Builds the HUD line; the length label is dropped when the row is too
/// narrow for both labels.
fn hud_line(score: u32, length: usize, available_width: usize, theme: &Theme) -> Line<'static> {
    let score_text = format!("Score: {score}");
    let length_text = format!("Length: {length}");
    let score_span = Span::styled(
        score_text.clone(),
        Style::new()
            .fg(theme.hud_score)
            .add_modifier(Modifier::BOLD),
    );

    let used = score_text.width() + length_text.width();
    if used >= available_width {
        return Line::from(score_span);
    }

    Line::from(vec![
        Span::styled(length_text, Style::new().fg(theme.border_fg)),
        Span::raw(" ".repeat(available_width - used)),
        score_span,
    ])
}
