//! Sessions: one namespace, many statements.

use std::io;

use r4_diagnostic::Diagnostic;
use r4_ir::StringInterner;

use crate::interpreter::{Interpreter, ResultNames};
use crate::scope::Scope;
use crate::table::{ValueKind, VarId};
use crate::{Resolver, SessionConfig};

/// Counters over the life of a session.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct SessionStats {
    /// Statements passed to [`Session::evaluate`].
    pub statements: u64,
    /// Statements that ended in a diagnostic.
    pub failed_statements: u64,
    /// `<-` and `<<-` assignments run.
    pub pumps: u64,
    /// Assignments that recorded a non-zero `_result`.
    pub failed_pumps: u64,
    pub bytes_pumped: u64,
}

/// An evaluation session over a [`Resolver`].
///
/// The session owns the word interner, the variable table, and the level
/// stack; they persist across statements. Each statement is lexed, parsed
/// into its own arena, and run inside a fresh statement level. Handles still
/// held when the session is dropped are released.
///
/// ```text
/// let mut session = Session::new(MemoryResolver::new(), SessionConfig::default())?;
/// session.evaluate("$greeting <- `hello`")?;
/// assert_eq!(session.read_variable("$greeting/_length"), Some(b"5".to_vec()));
/// ```
pub struct Session<R: Resolver> {
    resolver: R,
    interner: StringInterner,
    scope: Scope<R::Handle>,
    config: SessionConfig,
    buffer: Box<[u8]>,
    stats: SessionStats,
    names: ResultNames,
}

impl<R: Resolver> Session<R> {
    /// Start a session. Fails only when the resolver cannot produce its
    /// root or cwd.
    pub fn new(mut resolver: R, config: SessionConfig) -> io::Result<Self> {
        let interner = StringInterner::new();
        let scope = Scope::new(&mut resolver, &interner)?;
        let names = ResultNames::new(&interner);
        tracing::debug!(?config, "session started");
        Ok(Session {
            resolver,
            interner,
            scope,
            buffer: vec![0; config.buffer_size.max(1)].into_boxed_slice(),
            config,
            stats: SessionStats::default(),
            names,
        })
    }

    /// Run one statement.
    ///
    /// Lex and syntax errors abort it before anything runs. Name lookups
    /// that fail bind `Empty`, and I/O failures are recorded in the
    /// target's `_result`; neither is an error here.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn evaluate(&mut self, text: &str) -> Result<(), Diagnostic> {
        self.stats.statements += 1;
        let result = self.run(text);
        if let Err(diag) = &result {
            self.stats.failed_statements += 1;
            tracing::debug!(%diag, "statement failed");
        }
        result
    }

    fn run(&mut self, text: &str) -> Result<(), Diagnostic> {
        let tokens = r4_lexer::lex(text, &self.interner).map_err(|err| err.to_diagnostic())?;
        let parsed = r4_parse::parse(&tokens, &self.interner)
            .map_err(|err| err.to_diagnostic(&self.interner))?;
        let mut interpreter = Interpreter {
            resolver: &mut self.resolver,
            scope: &mut self.scope,
            interner: &self.interner,
            arena: &parsed.arena,
            config: &self.config,
            buffer: &mut self.buffer[..],
            stats: &mut self.stats,
            names: self.names,
        };
        interpreter.run_statement(parsed.root)
    }

    /// The bytes of the temporary variable at `path`.
    ///
    /// `path` is `/`-separated: absolute from the root, `$`-prefixed for
    /// session variables, otherwise relative to the working cursor. Only
    /// variables that already exist are visited; nothing is resolved.
    pub fn read_variable(&self, path: &str) -> Option<Vec<u8>> {
        let var = self.find_variable(path)?;
        match self.scope.table().kind_of(var)? {
            ValueKind::Temporary(bytes) => Some(bytes.clone()),
            ValueKind::Empty | ValueKind::Resolved(_) => None,
        }
    }

    fn find_variable(&self, path: &str) -> Option<VarId> {
        let (start, rest) = if let Some(rest) = path.strip_prefix('$') {
            (self.scope.session_root(), rest)
        } else if let Some(rest) = path.strip_prefix('/') {
            (self.scope.root(), rest)
        } else {
            (self.scope.working(), path)
        };
        rest.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(start, |var, segment| {
                let name = self.interner.intern(segment.as_bytes());
                self.scope.find_child(var, name)
            })
    }

    /// The working cursor as a path, for prompts: `/a/b` from the root,
    /// `./a` from the starting directory, `$v` among session variables.
    pub fn working_path(&self) -> String {
        let table = self.scope.table();
        let mut parts = Vec::new();
        let mut var = self.scope.working();
        while let Some(parent) = table.var(var).parent {
            parts.push(self.interner.display(table.var(var).name));
            var = parent;
        }
        parts.reverse();
        let joined = parts.join("/");
        if var == self.scope.cwd() {
            if joined.is_empty() {
                ".".to_owned()
            } else {
                format!("./{joined}")
            }
        } else if var == self.scope.session_root() {
            format!("${joined}")
        } else {
            format!("/{joined}")
        }
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut R {
        &mut self.resolver
    }

    /// Levels currently entered above the base level. Zero between
    /// statements.
    pub fn depth(&self) -> usize {
        self.scope.depth()
    }
}

impl<R: Resolver> Drop for Session<R> {
    fn drop(&mut self) {
        self.scope.release_all(&mut self.resolver);
    }
}
