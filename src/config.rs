use ratatui::style::Color;
use ratatui::symbols::border;
use thiserror::Error;

/// Default board width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 30;

/// Default board height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Default tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Terminal columns used to draw one grid cell, so cells look roughly square.
pub const TILE_WIDTH: u16 = 2;

/// Random samples tried before food placement falls back to a free-cell scan.
pub const MAX_FOOD_SAMPLE_ATTEMPTS: usize = 64;

/// Problems found while validating game configuration.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid width must be at least 2 cells, got {0}")]
    GridTooNarrow(u16),
    #[error("grid height must be at least 1 cell, got {0}")]
    GridTooShort(u16),
    #[error("grid {width}x{height} leaves no room for food next to the starting snake")]
    GridTooSmall { width: u16, height: u16 },
    #[error("tick interval must be at least 1 ms")]
    TickIntervalZero,
}

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Validates dimensions that can host the two-segment starting snake plus food.
    pub fn new(width: u16, height: u16) -> Result<Self, ConfigError> {
        if width < 2 {
            return Err(ConfigError::GridTooNarrow(width));
        }
        if height < 1 {
            return Err(ConfigError::GridTooShort(height));
        }

        let size = Self { width, height };
        if size.total_cells() < 3 {
            return Err(ConfigError::GridTooSmall { width, height });
        }

        Ok(size)
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Colors applied to every visual element.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub grid: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_score: Color,
    pub game_over_title: Color,
    pub game_over_score: Color,
    pub game_over_prompt: Color,
}

/// Dark board, green snake with a darker head, red food.
pub const THEME_CLASSIC: Theme = Theme {
    snake_head: Color::Green,
    snake_body: Color::LightGreen,
    food: Color::Red,
    grid: Color::Rgb(40, 40, 40),
    play_bg: Color::Black,
    border_fg: Color::DarkGray,
    hud_score: Color::White,
    game_over_title: Color::Red,
    game_over_score: Color::White,
    game_over_prompt: Color::Yellow,
};

/// Rounded border around the play area.
pub const BORDER_PLAY_AREA: border::Set = border::ROUNDED;

/// Glyph for an empty cell (grid dot).
pub const GLYPH_EMPTY: &str = " ·";

/// Glyph for food.
pub const GLYPH_FOOD: &str = "●●";

/// Glyph for body segments.
pub const GLYPH_SNAKE_BODY: &str = "██";

/// Glyph for the head when moving up.
pub const GLYPH_SNAKE_HEAD_UP: &str = "▀▀";

/// Glyph for the head when moving down.
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▄▄";

/// Glyph for the head when moving left.
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀█";

/// Glyph for the head when moving right.
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "█▶";
