use std::fmt;
use std::io;

/// Outcome of one assignment, recorded as the decimal `_result` variable.
///
/// Codes are negative errno values so scripts can test them the way they
/// test system calls.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Status {
    Ok,
    NotFound,
    Io,
    Invalid,
    Loop,
}

impl Status {
    pub const fn code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::NotFound => -2,
            Status::Io => -5,
            Status::Invalid => -22,
            Status::Loop => -40,
        }
    }

    #[inline]
    pub const fn is_ok(self) -> bool {
        matches!(self, Status::Ok)
    }

    /// Classify an I/O error from the resolver.
    pub fn from_io(err: &io::Error) -> Status {
        match err.kind() {
            io::ErrorKind::NotFound => Status::NotFound,
            io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData => Status::Invalid,
            _ => Status::Io,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_negative_errno() {
        assert_eq!(Status::Ok.to_string(), "0");
        assert_eq!(Status::NotFound.to_string(), "-2");
        assert_eq!(Status::Io.to_string(), "-5");
        assert_eq!(Status::Invalid.to_string(), "-22");
        assert_eq!(Status::Loop.to_string(), "-40");
    }

    #[test]
    fn io_errors_are_classified() {
        let missing = io::Error::from(io::ErrorKind::NotFound);
        assert_eq!(Status::from_io(&missing), Status::NotFound);
        let bad = io::Error::from(io::ErrorKind::InvalidInput);
        assert_eq!(Status::from_io(&bad), Status::Invalid);
        assert_eq!(Status::from_io(&io::Error::other("disk on fire")), Status::Io);
    }
}
