use std::fmt;

use crate::option::{OptionKey, OptionKind};

pub type Result<T> = std::result::Result<T, Error>;

/// Broad class of an [`Error`], following the point at which it was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Declaring an option.
    Registration,
    /// Querying an option after parsing.
    Lookup,
    /// Classifying the command line.
    Parse,
    /// Reading a positional argument.
    Index,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("option needs a short letter or a long name")]
    MissingKey,

    #[error("option -{0} has been defined")]
    DuplicateShort(char),

    #[error("option --{0} has been defined")]
    DuplicateLong(String),

    #[error("option {0} is undefined")]
    Undefined(OptionKey),

    #[error("option {key} is {actual}, not {expected}")]
    KindMismatch {
        key: OptionKey,
        expected: OptionKind,
        actual: OptionKind,
    },

    #[error("argument list is empty, the program name is missing")]
    MissingProgramName,

    #[error("program name can not start with a -: {0}")]
    ProgramName(String),

    #[error("illegal option {0}")]
    UnknownOption(OptionKey),

    #[error("option --{0} is a flag, cannot take an argument")]
    UnwantedValue(String),

    #[error("the argument of option {0} is missing")]
    MissingValue(OptionKey),

    #[error("the argument of option {0} is empty")]
    EmptyValue(OptionKey),

    #[error("-{0} is not a flag, cannot be grouped")]
    NotAFlag(char),

    #[error("positional index {index} is out of range, {count} available")]
    OutOfRange { index: usize, count: usize },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingKey | Error::DuplicateShort(_) | Error::DuplicateLong(_) => {
                ErrorKind::Registration
            }
            Error::Undefined(_) | Error::KindMismatch { .. } => ErrorKind::Lookup,
            Error::MissingProgramName
            | Error::ProgramName(_)
            | Error::UnknownOption(_)
            | Error::UnwantedValue(_)
            | Error::MissingValue(_)
            | Error::EmptyValue(_)
            | Error::NotAFlag(_) => ErrorKind::Parse,
            Error::OutOfRange { .. } => ErrorKind::Index,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Registration => "registration",
            ErrorKind::Lookup => "lookup",
            ErrorKind::Parse => "parse",
            ErrorKind::Index => "index",
        };
        f.write_str(s)
    }
}
