use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    BORDER_PLAY_AREA, GLYPH_EMPTY, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN,
    GLYPH_SNAKE_HEAD_LEFT, GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP, GridSize, TILE_WIDTH,
    Theme,
};
use crate::game::GameState;
use crate::input::Heading;
use crate::snake::Cell;
use crate::ui::hud::{HUD_HEIGHT, render_hud};
use crate::ui::menu::{centered_popup, render_game_over_menu, render_too_small};

/// Terminal columns and rows needed for the HUD plus the bordered board.
#[must_use]
pub fn required_size(grid: GridSize) -> (u16, u16) {
    let width = grid.width.saturating_mul(TILE_WIDTH).saturating_add(2);
    let height = grid.height.saturating_add(2).saturating_add(HUD_HEIGHT);
    (width, height)
}

/// Renders the full game frame from immutable state.
pub fn render<R>(frame: &mut Frame<'_>, state: &GameState<R>, theme: &Theme) {
    let area = frame.area();
    let (width, height) = required_size(state.grid());
    if area.width < width || area.height < height {
        render_too_small(frame, area, width, height);
        return;
    }

    let board = centered_popup(area, width, height);
    let [hud_area, play_area] =
        Layout::vertical([Constraint::Length(HUD_HEIGHT), Constraint::Min(0)]).areas(board);

    render_hud(frame, hud_area, state.score(), state.snake().len(), theme);

    let block = Block::bordered()
        .border_set(BORDER_PLAY_AREA)
        .border_style(Style::new().fg(theme.border_fg))
        .style(Style::new().bg(theme.play_bg));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_grid(frame, inner, state.grid(), theme);
    render_food(frame, inner, state, theme);
    render_snake(frame, inner, state, theme);

    if !state.is_running() {
        render_game_over_menu(
            frame,
            play_area,
            state.score(),
            state.termination_cause(),
            theme,
        );
    }
}

fn render_grid(frame: &mut Frame<'_>, inner: Rect, grid: GridSize, theme: &Theme) {
    let style = Style::new().fg(theme.grid).bg(theme.play_bg);
    let buffer = frame.buffer_mut();

    for y in 0..i32::from(grid.height) {
        for x in 0..i32::from(grid.width) {
            if let Some((col, row)) = cell_to_terminal(inner, grid, Cell { x, y }) {
                buffer.set_string(col, row, GLYPH_EMPTY, style);
            }
        }
    }
}

fn render_food<R>(frame: &mut Frame<'_>, inner: Rect, state: &GameState<R>, theme: &Theme) {
    let Some((x, y)) = cell_to_terminal(inner, state.grid(), state.food()) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food).bg(theme.play_bg));
}

fn render_snake<R>(frame: &mut Frame<'_>, inner: Rect, state: &GameState<R>, theme: &Theme) {
    let grid = state.grid();
    let buffer = frame.buffer_mut();
    let body_style = Style::new().fg(theme.snake_body).bg(theme.play_bg);

    for segment in state.snake().segments().skip(1) {
        if let Some((x, y)) = cell_to_terminal(inner, grid, *segment) {
            buffer.set_string(x, y, GLYPH_SNAKE_BODY, body_style);
        }
    }

    // Drawn last so the head stays visible when it lands on its own body.
    if let Some((x, y)) = cell_to_terminal(inner, grid, state.snake().head()) {
        buffer.set_string(
            x,
            y,
            head_glyph(state.heading()),
            Style::new()
                .fg(theme.snake_head)
                .bg(theme.play_bg)
                .add_modifier(Modifier::BOLD),
        );
    }
}

fn head_glyph(heading: Heading) -> &'static str {
    match heading {
        Heading::Up => GLYPH_SNAKE_HEAD_UP,
        Heading::Down => GLYPH_SNAKE_HEAD_DOWN,
        Heading::Left => GLYPH_SNAKE_HEAD_LEFT,
        Heading::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

/// Maps a grid cell to the terminal column/row of its left half.
fn cell_to_terminal(inner: Rect, bounds: GridSize, cell: Cell) -> Option<(u16, u16)> {
    if !cell.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(cell.x).ok()?.checked_mul(TILE_WIDTH)?;
    let y_offset = u16::try_from(cell.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(TILE_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;

    use crate::config::{GLYPH_FOOD, GLYPH_SNAKE_HEAD_RIGHT, GridSize, THEME_CLASSIC};
    use crate::game::GameState;
    use crate::input::Heading;
    use crate::snake::{Cell, Snake};

    use super::{cell_to_terminal, render, required_size};

    fn draw(state: &GameState, width: u16, height: u16) -> String {
        let mut terminal =
            Terminal::new(TestBackend::new(width, height)).expect("test terminal should build");
        terminal
            .draw(|frame| render(frame, state, &THEME_CLASSIC))
            .expect("draw should succeed");
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let width = usize::from(buffer.area.width);
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn reference_board_fits_an_80x24_terminal() {
        assert_eq!(required_size(GridSize::default()), (62, 23));
    }

    #[test]
    fn cells_are_two_columns_wide() {
        let inner = Rect::new(3, 2, 20, 5);
        let bounds = GridSize {
            width: 10,
            height: 5,
        };

        assert_eq!(cell_to_terminal(inner, bounds, Cell::new(0, 0)), Some((3, 2)));
        assert_eq!(cell_to_terminal(inner, bounds, Cell::new(9, 4)), Some((21, 6)));
        assert_eq!(cell_to_terminal(inner, bounds, Cell::new(-1, 0)), None);
        assert_eq!(cell_to_terminal(inner, bounds, Cell::new(10, 0)), None);
    }

    #[test]
    fn running_frame_shows_score_snake_and_food() {
        let state = GameState::from_parts(
            GridSize::default(),
            Snake::from_segments(vec![Cell::new(15, 10), Cell::new(14, 10)]),
            Heading::Right,
            Cell::new(3, 3),
            StdRng::seed_from_u64(1),
        );

        let text = draw(&state, 80, 24);

        assert!(text.contains("Score: 0"));
        assert!(text.contains(GLYPH_SNAKE_HEAD_RIGHT));
        assert!(text.contains(GLYPH_FOOD));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn terminated_frame_shows_game_over_popup() {
        let mut state = GameState::from_parts(
            GridSize::default(),
            Snake::from_segments(vec![Cell::new(0, 5), Cell::new(1, 5)]),
            Heading::Left,
            Cell::new(3, 3),
            StdRng::seed_from_u64(1),
        );
        state.tick();

        let text = draw(&state, 80, 24);

        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Score: 0"));
        assert!(text.contains("Press SPACE to restart"));
    }

    #[test]
    fn small_terminal_shows_notice() {
        let state = GameState::new_with_seed(GridSize::default(), 1);

        let text = draw(&state, 40, 10);

        assert!(text.contains("Terminal too small"));
    }
}
