//! Line-oriented input: each stdin line names one key press.
use cavern_core::{InputEvent, Key};

/// What a line of input asks the runner to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Key(InputEvent),
    Quit,
}

/// Parses one input line. Blank and unrecognised lines yield `None`.
pub fn parse_line(line: &str) -> Option<Command> {
    let word = line.trim().to_ascii_lowercase();
    let key = match word.as_str() {
        "" => return None,
        "q" | "quit" => return Some(Command::Quit),
        "enter" | "start" => Key::Enter,
        "esc" | "escape" => Key::Escape,
        "w" | "up" => Key::Up,
        "a" | "left" => Key::Left,
        "s" | "down" => Key::Down,
        "d" | "right" => Key::Right,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Key::Char(ch),
                _ => return None,
            }
        }
    };
    Some(Command::Key(InputEvent::KeyDown(key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(line: &str) -> Option<Key> {
        match parse_line(line)? {
            Command::Key(InputEvent::KeyDown(key)) => Some(key),
            Command::Quit => None,
        }
    }

    #[test]
    fn words_and_wasd_map_to_keys() {
        assert_eq!(key("enter"), Some(Key::Enter));
        assert_eq!(key("  ESC "), Some(Key::Escape));
        assert_eq!(key("w"), Some(Key::Up));
        assert_eq!(key("left"), Some(Key::Left));
        assert_eq!(key("s"), Some(Key::Down));
        assert_eq!(key("right"), Some(Key::Right));
        assert_eq!(key("x"), Some(Key::Char('x')));
    }

    #[test]
    fn quit_blank_and_unknown_lines() {
        assert_eq!(parse_line("q"), Some(Command::Quit));
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("jump"), None);
    }
}
