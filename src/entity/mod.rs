mod note;

pub use note::{Note, DEFAULT_NOTE_SIZE, MAX_Z_INDEX};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque note identifier, stable for the note's lifetime.
///
/// Fresh ids are UUID v4 strings. Ids hydrated from older boards may be any
/// string (the first boards used millisecond timestamps) and are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last four characters, used as the note's header label.
    pub fn short(&self) -> &str {
        let start = self
            .0
            .char_indices()
            .rev()
            .nth(3)
            .map(|(i, _)| i)
            .unwrap_or(0);
        &self.0[start..]
    }
}

impl From<&str> for NoteId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NoteId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The fixed note palette. Persisted as the hex value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Color {
    #[default]
    #[serde(rename = "#fdfd96")]
    Yellow,
    #[serde(rename = "#ffadad")]
    Pink,
    #[serde(rename = "#84e4c2")]
    Aqua,
    #[serde(rename = "#c7ceea")]
    Lavender,
    #[serde(rename = "#fdc2ad")]
    Peach,
}

impl Color {
    /// All swatches in palette order.
    pub fn palette() -> [Self; 5] {
        [
            Self::Yellow,
            Self::Pink,
            Self::Aqua,
            Self::Lavender,
            Self::Peach,
        ]
    }

    pub fn hex(&self) -> &'static str {
        match self {
            Self::Yellow => "#fdfd96",
            Self::Pink => "#ffadad",
            Self::Aqua => "#84e4c2",
            Self::Lavender => "#c7ceea",
            Self::Peach => "#fdc2ad",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Yellow => write!(f, "yellow"),
            Color::Pink => write!(f, "pink"),
            Color::Aqua => write!(f, "aqua"),
            Color::Lavender => write!(f, "lavender"),
            Color::Peach => write!(f, "peach"),
        }
    }
}

impl std::str::FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if let Some(color) = Color::palette().into_iter().find(|c| c.hex() == lower) {
            return Ok(color);
        }
        match lower.as_str() {
            "yellow" => Ok(Color::Yellow),
            "pink" | "red" => Ok(Color::Pink),
            "aqua" | "green" => Ok(Color::Aqua),
            "lavender" | "blue" | "purple" => Ok(Color::Lavender),
            "peach" | "orange" => Ok(Color::Peach),
            _ => Err(format!("Invalid color: {}", s)),
        }
    }
}
