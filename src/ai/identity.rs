//! Display names for computer players.

/// Names handed out by default, one per letter `a`..`z`.
const DEFAULT_NAMES: [&str; 26] = [
    "Alice", "Bob", "Carol", "Dave", "Emma", "Frank", "Grace", "Hank", "Iris", "Jack", "Kate",
    "Liam", "Mona", "Nick", "Olga", "Pete", "Quinn", "Rosa", "Sam", "Tina", "Ugo", "Vera",
    "Walt", "Xena", "Yuri", "Zoe",
];

/// Name used when a tag has no entry in the table.
const FALLBACK_NAME: &str = "Anonymous";

/// A pool of display names indexed by a single-letter agent tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTable {
    names: Vec<String>,
}

impl Default for NameTable {
    fn default() -> Self {
        NameTable {
            names: DEFAULT_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl NameTable {
    /// A table whose n-th name belongs to the n-th letter of the alphabet.
    pub fn new(names: Vec<String>) -> Self {
        NameTable { names }
    }

    /// The name for tag `character`, case-insensitive.
    pub fn get(&self, character: char) -> Option<&str> {
        if !character.is_ascii_alphabetic() {
            return None;
        }
        let index = usize::from(character.to_ascii_lowercase() as u8 - b'a');
        self.names.get(index).map(String::as_str)
    }

    pub fn display_name(&self, character: char) -> String {
        self.get(character).unwrap_or(FALLBACK_NAME).to_string()
    }
}
