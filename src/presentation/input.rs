use crate::application::{App, GameAction};
use crate::domain::Direction;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        let action = Self::map_key(key, modifiers);
        if action == GameAction::Help {
            tracing::debug!(?key, "unrecognized key");
        }
        app.apply(action);
    }

    /// Maps a key press to the action it triggers. Letters are
    /// case-insensitive; anything unbound asks for help.
    pub fn map_key(key: KeyCode, modifiers: KeyModifiers) -> GameAction {
        if modifiers.contains(KeyModifiers::CONTROL) {
            return match key {
                KeyCode::Char('c') | KeyCode::Char('C') => GameAction::Quit,
                _ => GameAction::Help,
            };
        }

        match key {
            KeyCode::Up => GameAction::Move(Direction::Up),
            KeyCode::Down => GameAction::Move(Direction::Down),
            KeyCode::Left => GameAction::Move(Direction::Left),
            KeyCode::Right => GameAction::Move(Direction::Right),
            KeyCode::Esc => GameAction::Quit,
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => GameAction::Move(Direction::Up),
                's' => GameAction::Move(Direction::Down),
                'a' => GameAction::Move(Direction::Left),
                'd' => GameAction::Move(Direction::Right),
                'u' => GameAction::Undo,
                'o' => GameAction::Save,
                'q' => GameAction::Quit,
                _ => GameAction::Help,
            },
            _ => GameAction::Help,
        }
    }
}
