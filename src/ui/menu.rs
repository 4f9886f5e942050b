use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::game::TerminationCause;

const RESTART_PROMPT: &str = "Press SPACE to restart";
const QUIT_PROMPT: &str = "[Q] Quit";

/// Draws the game-over popup centered over `area`.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    cause: Option<TerminationCause>,
    theme: &Theme,
) {
    let score_text = format!("Score: {score}");
    let cause_text = match cause {
        Some(TerminationCause::WallCollision) => "You hit the wall",
        Some(TerminationCause::SelfCollision) => "You bit yourself",
        Some(TerminationCause::BoardFilled) => "The board is full!",
        None => "",
    };

    let lines = vec![
        Line::from("GAME OVER").style(
            Style::new()
                .fg(theme.game_over_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(score_text.as_str()).style(
            Style::new()
                .fg(theme.game_over_score)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(cause_text).style(Style::new().fg(theme.game_over_score)),
        Line::from(""),
        Line::from(RESTART_PROMPT).style(Style::new().fg(theme.game_over_prompt)),
        Line::from(QUIT_PROMPT).style(Style::new().fg(theme.border_fg)),
    ];

    let content_width = [score_text.as_str(), cause_text, RESTART_PROMPT, QUIT_PROMPT]
        .iter()
        .map(|text| text.width())
        .max()
        .unwrap_or(0);
    let width = u16::try_from(content_width + 4).unwrap_or(u16::MAX);
    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
    let popup = centered_popup(area, width, height);

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().border_style(Style::new().fg(theme.game_over_title))),
        popup,
    );
}

/// Tells the player to enlarge the terminal.
pub fn render_too_small(frame: &mut Frame<'_>, area: Rect, needed_width: u16, needed_height: u16) {
    let lines = vec![
        Line::from("Terminal too small"),
        Line::from(format!("need {needed_width}x{needed_height}")),
        Line::from(format!("have {}x{}", area.width, area.height)),
    ];

    let popup = centered_popup(area, area.width, 3);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        popup,
    );
}

/// Returns a `width` x `height` rect centered in `area`, clamped to it.
#[must_use]
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
