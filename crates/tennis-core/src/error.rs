use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use thiserror::Error;

/// Level of the scoring hierarchy an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    Game,
    Tiebreak,
    Set,
    Match,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("The {0} is already decided")]
    AlreadyDecided(Stage),
}

pub type Result<T> = std::result::Result<T, Error>;
