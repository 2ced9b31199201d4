//! Session configuration.

/// Bytes moved per tube step unless configured otherwise.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// How many `->` links an assignment follows before giving up with `Loop`.
pub const DEFAULT_MAX_ALIAS_DEPTH: usize = 8;

/// Environment variable overriding [`SessionConfig::buffer_size`].
pub const BUFFER_SIZE_ENV: &str = "R4_BUFFER_SIZE";

/// Tunables for one [`Session`](crate::Session).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SessionConfig {
    /// Size of the tube's transfer buffer. Never zero.
    pub buffer_size: usize,
    pub max_alias_depth: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            buffer_size: DEFAULT_BUFFER_SIZE,
            max_alias_depth: DEFAULT_MAX_ALIAS_DEPTH,
        }
    }
}

impl SessionConfig {
    /// Defaults, with `R4_BUFFER_SIZE` applied when set.
    pub fn from_env() -> Self {
        let config = SessionConfig::default();
        match std::env::var(BUFFER_SIZE_ENV) {
            Ok(value) => config.with_buffer_size_override(&value),
            Err(_) => config,
        }
    }

    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    #[must_use]
    pub fn with_max_alias_depth(mut self, depth: usize) -> Self {
        self.max_alias_depth = depth;
        self
    }

    fn with_buffer_size_override(self, value: &str) -> Self {
        match value.trim().parse::<usize>() {
            Ok(size) if size > 0 => self.with_buffer_size(size),
            _ => {
                tracing::warn!(value, "ignoring invalid {BUFFER_SIZE_ENV}");
                self
            }
        }
    }
}
