use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Food,
    Transport,
    Bills,
    Shopping,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Bills => "Bills",
            Self::Shopping => "Shopping",
            Self::Other => "Other",
        }
    }

    /// Lenient parse used when reading stored rows: anything unknown is `Other`.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(Self::Other)
    }

    pub fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Transport,
            Self::Bills,
            Self::Shopping,
            Self::Other,
        ]
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "transport" => Ok(Self::Transport),
            "bills" => Ok(Self::Bills),
            "shopping" => Ok(Self::Shopping),
            "other" => Ok(Self::Other),
            _ => {
                let names: Vec<&str> = Self::all().iter().map(|c| c.as_str()).collect();
                Err(Error::invalid(format!(
                    "unknown category '{}' (expected one of: {})",
                    s.trim(),
                    names.join(", ")
                )))
            }
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
