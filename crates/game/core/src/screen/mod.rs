//! Screen state machine: start, play, win and lose.
//!
//! A [`ScreenController`] owns the active [`Screen`] and the session context.
//! Input events go to the active screen, which may request a switch; the
//! controller enters the new screen, exits the old one and renders whichever
//! is active.

mod play;
mod render;

pub use play::PlayScreen;
pub use render::{CellBuffer, InputEvent, Key, RenderSink, strip_markup};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{ConfigError, GameConfig};
use crate::engine::TurnError;
use crate::entity::EntityCatalog;
use crate::error::{ErrorSeverity, GameError};
use crate::glyph::Color;
use crate::map::MapError;
use crate::repository::RepositoryError;

/// Lines of the win and lose banners. Each win line gets its own background.
pub const BANNER_LINES: usize = 22;

pub const START_TITLE: &str = "%c{yellow}Cavern Roguelike";
pub const START_PROMPT: &str = "Press [Enter] to start!";
pub const WIN_TEXT: &str = "You win!";
pub const LOSE_TEXT: &str = "%b{red}You lose! :(";

/// Failures while switching or driving screens.
#[derive(Debug, thiserror::Error)]
pub enum ScreenError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl GameError for ScreenError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ScreenError::Repository(err) => err.severity(),
            ScreenError::Map(err) => err.severity(),
            ScreenError::Turn(err) => err.severity(),
            ScreenError::Config(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ScreenError::Repository(err) => err.error_code(),
            ScreenError::Map(err) => err.error_code(),
            ScreenError::Turn(err) => err.error_code(),
            ScreenError::Config(err) => err.error_code(),
        }
    }
}

/// Discriminant of [`Screen`], handy for logging and assertions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ScreenKind {
    Start,
    Play,
    Win,
    Lose,
}

/// Win banner with backgrounds picked once, when the screen is created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WinScreen {
    backgrounds: Vec<Color>,
}

impl WinScreen {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let backgrounds = (0..BANNER_LINES)
            .map(|_| Color::Rgb(rng.r#gen(), rng.r#gen(), rng.r#gen()))
            .collect();
        Self { backgrounds }
    }

    pub fn backgrounds(&self) -> &[Color] {
        &self.backgrounds
    }

    fn render(&self, sink: &mut dyn RenderSink) {
        for (line, background) in self.backgrounds.iter().enumerate() {
            sink.draw_text(2, line as u32 + 1, &format!("%b{{{background}}}{WIN_TEXT}"));
        }
    }
}

#[derive(Debug)]
pub enum Screen {
    Start,
    Play(Box<PlayScreen>),
    Win(WinScreen),
    Lose,
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Start => ScreenKind::Start,
            Screen::Play(_) => ScreenKind::Play,
            Screen::Win(_) => ScreenKind::Win,
            Screen::Lose => ScreenKind::Lose,
        }
    }

    pub fn as_play(&self) -> Option<&PlayScreen> {
        match self {
            Screen::Play(play) => Some(play.as_ref()),
            _ => None,
        }
    }

    /// Called once when the screen becomes active. Entering play starts the
    /// turn engine.
    pub fn enter(&mut self) -> Result<(), ScreenError> {
        tracing::debug!(screen = %self.kind(), "entered screen");
        if let Screen::Play(play) = self {
            play.start()?;
        }
        Ok(())
    }

    pub fn exit(&mut self) {
        tracing::debug!(screen = %self.kind(), "exited screen");
    }

    pub fn render(&self, sink: &mut dyn RenderSink) {
        match self {
            Screen::Start => {
                sink.draw_text(1, 1, START_TITLE);
                sink.draw_text(1, 2, START_PROMPT);
            }
            Screen::Play(play) => play.render(sink),
            Screen::Win(win) => win.render(sink),
            Screen::Lose => {
                for line in 0..BANNER_LINES {
                    sink.draw_text(2, line as u32 + 1, LOSE_TEXT);
                }
            }
        }
    }

    /// Reacts to one input event, returning the screen to switch to, if any.
    pub fn handle_input(
        &mut self,
        event: &InputEvent,
        context: &mut ScreenContext,
    ) -> Result<Option<Screen>, ScreenError> {
        let InputEvent::KeyDown(key) = *event;

        match self {
            Screen::Start if key == Key::Enter => {
                let seed = context.rng.r#gen();
                let play = PlayScreen::new(&context.config, &context.catalog, seed)?;
                Ok(Some(Screen::Play(Box::new(play))))
            }
            Screen::Play(_) if key == Key::Enter => {
                Ok(Some(Screen::Win(WinScreen::new(&mut context.rng))))
            }
            Screen::Play(_) if key == Key::Escape => Ok(Some(Screen::Lose)),
            Screen::Play(play) => {
                if let Some((dx, dy)) = key.direction() {
                    let outcome = play.move_player(dx, dy);
                    tracing::trace!(?outcome, "player move");
                    play.unlock()?;
                }
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}

/// Session-wide state the screens draw on.
#[derive(Debug)]
pub struct ScreenContext {
    pub config: GameConfig,
    pub catalog: EntityCatalog,
    pub rng: StdRng,
}

impl ScreenContext {
    /// Seeds the session RNG from `config.seed`, or from OS entropy when unset.
    pub fn new(config: GameConfig, catalog: EntityCatalog) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            catalog,
            rng,
        }
    }
}

/// Owns the active screen and routes input and rendering to it.
#[derive(Debug)]
pub struct ScreenController {
    screen: Screen,
    context: ScreenContext,
}

impl ScreenController {
    /// Starts on the start screen.
    pub fn new(context: ScreenContext) -> Result<Self, ScreenError> {
        let mut screen = Screen::Start;
        screen.enter()?;
        Ok(Self { screen, context })
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn context(&self) -> &ScreenContext {
        &self.context
    }

    /// Forwards `event` to the active screen and performs any requested switch.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<ScreenKind, ScreenError> {
        if let Some(next) = self.screen.handle_input(&event, &mut self.context)? {
            self.switch_to(next)?;
        }
        Ok(self.screen.kind())
    }

    pub fn switch_to(&mut self, mut next: Screen) -> Result<(), ScreenError> {
        next.enter()?;
        self.screen.exit();
        self.screen = next;
        Ok(())
    }

    pub fn render(&self, sink: &mut dyn RenderSink) {
        self.screen.render(sink);
    }
}
