//! Trading environment.

use std::fmt;

/// Which trading API the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Paper trading (simulated).
    #[default]
    Paper,
    /// Live trading (real money).
    Live,
}

impl Environment {
    /// Parse `APCA_ENV` style values. Anything other than `live` is paper.
    #[must_use]
    pub fn from_str_case_insensitive(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("live") {
            Self::Live
        } else {
            Self::Paper
        }
    }

    /// Default trading API base URL.
    #[must_use]
    pub const fn trading_base_url(self) -> &'static str {
        match self {
            Self::Paper => "https://paper-api.alpaca.markets",
            Self::Live => "https://api.alpaca.markets",
        }
    }

    /// Whether orders move real money.
    #[must_use]
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Live)
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Paper => "PAPER",
            Self::Live => "LIVE",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
