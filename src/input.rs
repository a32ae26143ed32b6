use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    SelectUp,
    SelectDown,
    PageUp,
    PageDown,
    JumpTop,
    JumpBottom,
    CycleTheme,
    None,
}

pub fn handle_key(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _)
        | (KeyCode::Esc, _)
        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Navigation: arrow keys and vim jk
        (KeyCode::Up,   _) | (KeyCode::Char('k'), _) => Action::SelectUp,
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => Action::SelectDown,

        (KeyCode::PageUp,   _) => Action::PageUp,
        (KeyCode::PageDown, _) => Action::PageDown,

        (KeyCode::Char('g'), _) | (KeyCode::Home, _) => Action::JumpTop,
        (KeyCode::Char('G'), _) | (KeyCode::End,  _) => Action::JumpBottom,

        (KeyCode::Char('t'), _) => Action::CycleTheme,

        _ => Action::None,
    }
}
