//! Roster errors.

/// Errors raised by roster bookkeeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// The name is not part of this roster's pool
    UnknownName(String),
    /// The robot already died this session; its record is final
    AlreadyDead(String),
    /// Every name in the pool has been used
    PoolExhausted,
    /// A configured pool listed the same name twice
    DuplicateName(String),
    /// A configured pool contained a blank name
    EmptyName,
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::UnknownName(name) => write!(f, "Unknown robot name: {}", name),
            RosterError::AlreadyDead(name) => write!(f, "Robot {} is already dead", name),
            RosterError::PoolExhausted => write!(f, "No unused robot names remain"),
            RosterError::DuplicateName(name) => {
                write!(f, "Duplicate robot name in pool: {}", name)
            }
            RosterError::EmptyName => write!(f, "Robot names must not be blank"),
        }
    }
}

impl std::error::Error for RosterError {}
