use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ground-truth label attached to every block a session persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionLabel {
    Genuine,
    Imposter,
}

impl SessionLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionLabel::Genuine => "Genuine",
            SessionLabel::Imposter => "Imposter",
        }
    }
}

impl fmt::Display for SessionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "genuine" => Ok(SessionLabel::Genuine),
            "imposter" => Ok(SessionLabel::Imposter),
            other => Err(format!("unknown session label '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Genuine".parse::<SessionLabel>(), Ok(SessionLabel::Genuine));
        assert_eq!(
            "imposter".parse::<SessionLabel>(),
            Ok(SessionLabel::Imposter)
        );
        assert!("observer".parse::<SessionLabel>().is_err());
    }
}
