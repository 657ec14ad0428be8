//! Helpers for building terminal input events

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Helper to convert string key names to `KeyCode`
///
/// # Errors
/// Returns error if key name is not recognized
pub fn parse_key(key: &str) -> Result<(KeyCode, KeyModifiers), String> {
    let mut modifiers = KeyModifiers::NONE;
    let mut parts: Vec<&str> = key.split('+').collect();

    // A lone "+" is the zoom key, not a separator
    if key == "+" {
        return Ok((KeyCode::Char('+'), modifiers));
    }

    // Extract modifiers
    while parts.len() > 1 {
        match parts[0].to_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            _ => return Err(format!("Unknown modifier: {}", parts[0])),
        }
        parts.remove(0);
    }

    let code = match parts[0].to_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "backspace" => KeyCode::Backspace,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        single if single.chars().count() == 1 => KeyCode::Char(
            parts[0]
                .chars()
                .next()
                .ok_or_else(|| "Empty key name".to_owned())?,
        ),
        unknown => return Err(format!("Unknown key: {unknown}")),
    };

    Ok((code, modifiers))
}

/// Key press event from a key name
///
/// # Errors
/// Returns error if key name is not recognized
pub fn key_event(key: &str) -> Result<Event, String> {
    let (code, modifiers) = parse_key(key)?;
    Ok(Event::Key(KeyEvent::new(code, modifiers)))
}

/// Plain character press
pub fn char_event(character: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(character), KeyModifiers::NONE))
}

/// Left mouse button press at a cell
pub fn click_event(column: u16, row: u16) -> Event {
    mouse_event(MouseEventKind::Down(MouseButton::Left), column, row)
}

/// Mouse wheel event at a cell
///
/// # Errors
/// Returns error if the direction is neither `up` nor `down`
pub fn scroll_event(direction: &str, column: u16, row: u16) -> Result<Event, String> {
    let kind = match direction {
        "up" => MouseEventKind::ScrollUp,
        "down" => MouseEventKind::ScrollDown,
        other => return Err(format!("Unknown scroll direction: {other}")),
    };
    Ok(mouse_event(kind, column, row))
}

fn mouse_event(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}
