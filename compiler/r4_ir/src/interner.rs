//! Word interner.
//!
//! Every distinct lexeme text is stored exactly once for the lifetime of the
//! session. Texts are byte strings: escape decoding can produce arbitrary
//! bytes, so nothing here assumes UTF-8.

use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::borrow::Cow;
use std::fmt;

/// Storage behind the interner lock.
struct InternTable {
    /// Map from word content to index.
    map: FxHashMap<&'static [u8], u32>,
    /// Storage for word contents, indexed by `Name`.
    words: Vec<&'static [u8]>,
}

/// Error when interning a word fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// More than `u32::MAX` distinct words.
    Overflow { count: usize },
}

impl fmt::Display for InternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternError::Overflow { count } => write!(
                f,
                "word interner exceeded capacity: {count} words, max is {}",
                u32::MAX
            ),
        }
    }
}

impl std::error::Error for InternError {}

/// Session-wide word interner.
///
/// Interned words are leaked and never freed: a `Name` handed out once stays
/// valid until the process exits. Lookups take a read lock, so the interner
/// can be shared by reference between the lexer, parser, and evaluator.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    /// Create a new interner with the empty word pre-interned as [`Name::EMPTY`].
    pub fn new() -> Self {
        let empty: &'static [u8] = b"";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        StringInterner {
            table: RwLock::new(InternTable {
                map,
                words: vec![empty],
            }),
        }
    }

    /// Try to intern a word, returning its `Name` or an error on overflow.
    pub fn try_intern(&self, word: &[u8]) -> Result<Name, InternError> {
        // Fast path: already interned
        {
            let guard = self.table.read();
            if let Some(&index) = guard.map.get(word) {
                return Ok(Name::from_raw(index));
            }
        }

        let mut guard = self.table.write();

        // Double-check after acquiring write lock
        if let Some(&index) = guard.map.get(word) {
            return Ok(Name::from_raw(index));
        }

        let index = u32::try_from(guard.words.len()).map_err(|_| InternError::Overflow {
            count: guard.words.len(),
        })?;

        // Leak the word to get 'static lifetime
        let leaked: &'static [u8] = Box::leak(word.to_vec().into_boxed_slice());
        guard.words.push(leaked);
        guard.map.insert(leaked, index);
        Ok(Name::from_raw(index))
    }

    /// Intern a word, returning its `Name`.
    ///
    /// # Panics
    /// Panics if the interner exceeds capacity (over 4 billion words).
    #[inline]
    pub fn intern(&self, word: &[u8]) -> Name {
        self.try_intern(word).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Intern UTF-8 text.
    #[inline]
    pub fn intern_str(&self, word: &str) -> Name {
        self.intern(word.as_bytes())
    }

    /// Look up the bytes of a `Name`.
    ///
    /// The returned slice is `'static` because interned words are never freed.
    pub fn lookup(&self, name: Name) -> &'static [u8] {
        let guard = self.table.read();
        guard.words[name.index()]
    }

    /// Look up a `Name` for display, replacing invalid UTF-8.
    pub fn display(&self, name: Name) -> Cow<'static, str> {
        String::from_utf8_lossy(self.lookup(name))
    }

    /// Number of interned words, including the empty word.
    pub fn len(&self) -> usize {
        self.table.read().words.len()
    }

    /// Always `false`: the empty word is pre-interned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests;
