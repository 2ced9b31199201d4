//! The tube: assignment by streaming.
//!
//! A pump opens the target as a sink, then works through a stack of
//! sources. Pending expressions are expanded in place (lists push their
//! elements in reverse, levels push a leave marker under their body), names
//! become read streams or memory cursors, and byte-bearing units are copied
//! to the sink one buffer at a time. Whatever happens, the source stack is
//! drained before the pump returns, so every level entered by a source is
//! left again.
//!
//! A source that reads the target itself reads a copy taken before the sink
//! was opened: `x <<- x` doubles `x`, and `x <- x` leaves it as it was.

use std::borrow::Cow;
use std::io::{self, Read, Write};

use r4_diagnostic::Diagnostic;
use r4_ir::{AssignOp, ExprId, ExprKind, LevelKind};
use r4_stack::ensure_sufficient_stack;

use super::Interpreter;
use crate::errors;
use crate::table::{ValueKind, VarId};
use crate::{Resolver, Status};

/// One entry of the source stack.
enum Source<Rd> {
    /// Not expanded yet.
    Pending(ExprId),
    Stream(Rd),
    Memory {
        bytes: Cow<'static, [u8]>,
        offset: usize,
    },
    /// Leave the level a `Level` source entered.
    LeaveLevel(LevelKind),
}

enum SinkKind<W> {
    Object(W),
    /// Bytes for a temporary variable.
    Memory(Vec<u8>),
}

struct Sink<W> {
    kind: SinkKind<W>,
    /// The target variable.
    var: VarId,
    /// The target's contents when the pump started, if a source reads it.
    before: Option<Vec<u8>>,
    /// Bytes accepted so far.
    written: u64,
}

impl<W: Write> Sink<W> {
    /// Write all of `bytes`, counting each accepted chunk, so a failure
    /// leaves `written` exact.
    fn write(&mut self, mut bytes: &[u8]) -> io::Result<()> {
        match &mut self.kind {
            SinkKind::Memory(buf) => {
                buf.extend_from_slice(bytes);
                self.written += bytes.len() as u64;
            }
            SinkKind::Object(writer) => {
                while !bytes.is_empty() {
                    match writer.write(bytes) {
                        Ok(0) => return Err(io::Error::from(io::ErrorKind::WriteZero)),
                        Ok(n) => {
                            self.written += n as u64;
                            bytes = &bytes[n..];
                        }
                        Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                        Err(err) => return Err(err),
                    }
                }
            }
        }
        Ok(())
    }
}

/// Why a pump stopped early.
enum PumpError {
    /// The status to record on the target.
    Failed(Status, Option<io::Error>),
    Internal(Diagnostic),
}

impl From<io::Error> for PumpError {
    fn from(err: io::Error) -> Self {
        PumpError::Failed(Status::from_io(&err), Some(err))
    }
}

type Sources<R> = Vec<Source<<R as Resolver>::Reader>>;

impl<R: Resolver> Interpreter<'_, R> {
    /// `target <- source` and `target <<- source`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub(super) fn exec_pump(
        &mut self,
        op: AssignOp,
        target: ExprId,
        source: ExprId,
    ) -> Result<Status, Diagnostic> {
        self.stats.pumps += 1;
        let span = self.arena.get_expr(target).span;
        let named = self.eval_name(target)?;
        let var = match self.follow_links(named) {
            Ok(var) => var,
            Err(status) => return Ok(self.finish_failed(named, status, 0)),
        };

        let before = match self.snapshot(var, source) {
            Ok(before) => before,
            Err(PumpError::Internal(diag)) => return Err(diag),
            Err(PumpError::Failed(status, err)) => {
                if let Some(err) = &err {
                    tracing::warn!(diagnostic = %errors::open_failed(err, span), "assignment failed");
                }
                return Ok(self.finish_failed(var, status, 0));
            }
        };
        let kind = match self.open_sink(op, var) {
            Ok(kind) => kind,
            Err(err) => {
                let status = Status::from_io(&err);
                tracing::warn!(diagnostic = %errors::open_failed(&err, span), "assignment failed");
                return Ok(self.finish_failed(var, status, 0));
            }
        };
        let mut sink = Sink {
            kind,
            var,
            before,
            written: 0,
        };
        let mut sources: Sources<R> = vec![Source::Pending(source)];

        let pumped = self.pump(&mut sources, &mut sink);
        let drained = self.drain(&mut sources);
        let written = sink.written;
        self.stats.bytes_pumped += written;

        let status = match pumped {
            Ok(()) => self.finish_sink(op, var, sink.kind, written),
            Err(PumpError::Internal(diag)) => return Err(diag),
            Err(PumpError::Failed(status, err)) => {
                if let Some(err) = &err {
                    tracing::warn!(
                        diagnostic = %errors::pump_failed(err, written, span),
                        "assignment failed"
                    );
                }
                // Partial data stays where it landed.
                if let SinkKind::Memory(bytes) = sink.kind {
                    self.scope.set_temporary(&mut *self.resolver, var, bytes);
                }
                status
            }
        };
        drained?;

        if !status.is_ok() {
            self.stats.failed_pumps += 1;
        }
        self.record(var, status, written);
        tracing::debug!(%status, written, "pumped");
        Ok(status)
    }

    /// The contents of `target` when `source` reads it, taken before the
    /// sink truncates or grows it.
    fn snapshot(&mut self, target: VarId, source: ExprId) -> Result<Option<Vec<u8>>, PumpError> {
        if !matches!(self.scope.table().kind_of(target), Some(ValueKind::Resolved(_))) {
            return Ok(None);
        }
        if !self.reads_target(source, target).map_err(PumpError::Internal)? {
            return Ok(None);
        }
        let Some(ValueKind::Resolved(handle)) = self.scope.table().kind_of(target) else {
            return Ok(None);
        };
        let mut bytes = Vec::new();
        self.resolver.open_read(handle)?.read_to_end(&mut bytes)?;
        tracing::debug!(len = bytes.len(), "source reads the target; pumping a copy");
        Ok(Some(bytes))
    }

    /// Whether any name in `source` leads to the same object as `target`.
    fn reads_target(&mut self, source: ExprId, target: VarId) -> Result<bool, Diagnostic> {
        ensure_sufficient_stack(|| {
            let expr = *self.arena.get_expr(source);
            match expr.kind {
                ExprKind::Root | ExprKind::ObjectRef { .. } | ExprKind::VariableRef { .. } => {
                    let named = self.eval_name(source)?;
                    Ok(self
                        .follow_links(named)
                        .is_ok_and(|var| self.is_same_object(var, target)))
                }
                ExprKind::List(items) => {
                    let arena = self.arena;
                    for &item in arena.get_expr_list(items) {
                        if self.reads_target(item, target)? {
                            return Ok(true);
                        }
                    }
                    Ok(false)
                }
                ExprKind::Level { body, .. } => self.reads_target(body, target),
                _ => Ok(false),
            }
        })
    }

    /// Whether `a` and `b` are bound to the same resolver object.
    fn is_same_object(&self, a: VarId, b: VarId) -> bool {
        let table = self.scope.table();
        match (table.kind_of(a), table.kind_of(b)) {
            (Some(ValueKind::Resolved(a)), Some(ValueKind::Resolved(b))) => {
                self.resolver.same_object(a, b)
            }
            _ => false,
        }
    }

    /// Open the sink for `var`, creating the object when its parent holds one.
    fn open_sink(&mut self, op: AssignOp, var: VarId) -> io::Result<SinkKind<R::Writer>> {
        let append = op == AssignOp::Append;
        match self.scope.table().kind_of(var) {
            Some(ValueKind::Resolved(handle)) => open_writer(&mut *self.resolver, handle, append),
            Some(ValueKind::Temporary(bytes)) => Ok(SinkKind::Memory(if append {
                bytes.clone()
            } else {
                Vec::new()
            })),
            Some(ValueKind::Empty) | None => {
                let variable = *self.scope.table().var(var);
                let Some(parent) = variable.parent else {
                    return Err(io::Error::from(io::ErrorKind::InvalidInput));
                };
                match self.scope.table().kind_of(parent) {
                    Some(ValueKind::Temporary(_)) => Ok(SinkKind::Memory(Vec::new())),
                    Some(ValueKind::Resolved(dir)) => {
                        let name = self.interner.lookup(variable.name);
                        let handle = self.resolver.create(dir, name)?;
                        tracing::debug!(?handle, "created target");
                        let writer = open_writer(&mut *self.resolver, &handle, append);
                        self.scope.set_resolved(var, handle);
                        writer
                    }
                    Some(ValueKind::Empty) | None => Err(io::Error::from(io::ErrorKind::NotFound)),
                }
            }
        }
    }

    /// Move bytes until the source stack is empty or something fails.
    fn pump(&mut self, sources: &mut Sources<R>, sink: &mut Sink<R::Writer>) -> Result<(), PumpError> {
        while let Some(top) = sources.last_mut() {
            match top {
                Source::Pending(id) => {
                    let id = *id;
                    sources.pop();
                    self.advance(id, sources, sink)?;
                }
                Source::LeaveLevel(kind) => {
                    let kind = *kind;
                    sources.pop();
                    self.scope
                        .leave_level(kind, &mut *self.resolver)
                        .map_err(PumpError::Internal)?;
                }
                Source::Memory { bytes, offset } => {
                    let rest = bytes.get(*offset..).unwrap_or_default();
                    if rest.is_empty() {
                        sources.pop();
                        continue;
                    }
                    let n = rest.len().min(self.buffer.len());
                    self.buffer[..n].copy_from_slice(&rest[..n]);
                    *offset += n;
                    sink.write(&self.buffer[..n])?;
                }
                Source::Stream(reader) => {
                    let n = match reader.read(&mut self.buffer[..]) {
                        Ok(n) => n,
                        Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                        Err(err) => return Err(err.into()),
                    };
                    if n == 0 {
                        sources.pop();
                        continue;
                    }
                    sink.write(&self.buffer[..n])?;
                }
            }
        }
        Ok(())
    }

    /// Expand a pending source expression onto the stack.
    fn advance(
        &mut self,
        id: ExprId,
        sources: &mut Sources<R>,
        sink: &Sink<R::Writer>,
    ) -> Result<(), PumpError> {
        let expr = *self.arena.get_expr(id);
        match expr.kind {
            ExprKind::Literal(text) => sources.push(Source::Memory {
                bytes: Cow::Borrowed(self.interner.lookup(text)),
                offset: 0,
            }),
            ExprKind::Root | ExprKind::ObjectRef { .. } | ExprKind::VariableRef { .. } => {
                let named = self.eval_name(id).map_err(PumpError::Internal)?;
                let var = self
                    .follow_links(named)
                    .map_err(|status| PumpError::Failed(status, None))?;
                match self.scope.table().kind_of(var) {
                    Some(ValueKind::Resolved(_)) if self.is_same_object(var, sink.var) => {
                        // No copy means the sink created the target empty.
                        if let Some(before) = &sink.before {
                            sources.push(Source::Memory {
                                bytes: Cow::Owned(before.clone()),
                                offset: 0,
                            });
                        }
                    }
                    Some(ValueKind::Resolved(handle)) => {
                        sources.push(Source::Stream(self.resolver.open_read(handle)?));
                    }
                    Some(ValueKind::Temporary(bytes)) => sources.push(Source::Memory {
                        bytes: Cow::Owned(bytes.clone()),
                        offset: 0,
                    }),
                    Some(ValueKind::Empty) | None => {}
                }
            }
            ExprKind::List(items) => {
                let items = self.arena.get_expr_list(items);
                sources.extend(items.iter().rev().map(|&item| Source::Pending(item)));
            }
            ExprKind::Level { kind, body } => {
                self.scope.enter_level(kind);
                sources.push(Source::LeaveLevel(kind));
                sources.push(Source::Pending(body));
            }
            ExprKind::BinaryOp { op, .. } => {
                return Err(PumpError::Internal(errors::not_a_source(
                    op.as_symbol(),
                    expr.span,
                )));
            }
            ExprKind::UnaryOp { .. } => {
                return Err(PumpError::Internal(errors::not_a_source("not", expr.span)));
            }
            ExprKind::Assign { .. } | ExprKind::Sequence(_) | ExprKind::If { .. } => {
                return Err(PumpError::Internal(errors::not_a_source(
                    "a statement",
                    expr.span,
                )));
            }
        }
        Ok(())
    }

    /// Pop every remaining source, leaving the levels they entered.
    fn drain(&mut self, sources: &mut Sources<R>) -> Result<(), Diagnostic> {
        let mut first_error = None;
        while let Some(source) = sources.pop() {
            if let Source::LeaveLevel(kind) = source {
                if let Err(err) = self.scope.leave_level(kind, &mut *self.resolver) {
                    first_error.get_or_insert(err);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Close the sink after a complete pump.
    fn finish_sink(
        &mut self,
        op: AssignOp,
        var: VarId,
        kind: SinkKind<R::Writer>,
        written: u64,
    ) -> Status {
        match kind {
            SinkKind::Object(writer) => {
                let end = match op {
                    AssignOp::Replace => Some(written),
                    AssignOp::Append | AssignOp::Link => None,
                };
                match self.resolver.finish_write(writer, end) {
                    Ok(()) => Status::Ok,
                    Err(err) => {
                        tracing::warn!(%err, "closing the target failed");
                        Status::from_io(&err)
                    }
                }
            }
            SinkKind::Memory(bytes) => {
                self.scope.set_temporary(&mut *self.resolver, var, bytes);
                Status::Ok
            }
        }
    }

    /// Record an assignment that moved nothing.
    fn finish_failed(&mut self, var: VarId, status: Status, written: u64) -> Status {
        self.stats.failed_pumps += 1;
        self.record(var, status, written);
        status
    }

    /// Store `_result` and `_length` under `var`.
    fn record(&mut self, var: VarId, status: Status, written: u64) {
        let names = self.names;
        self.scope.set_child_temporary(
            &mut *self.resolver,
            var,
            names.result,
            status.to_string().into_bytes(),
        );
        self.scope.set_child_temporary(
            &mut *self.resolver,
            var,
            names.length,
            written.to_string().into_bytes(),
        );
    }
}

fn open_writer<R: Resolver>(
    resolver: &mut R,
    handle: &R::Handle,
    append: bool,
) -> io::Result<SinkKind<R::Writer>> {
    let writer = if append {
        resolver.open_append(handle)?
    } else {
        resolver.open_write_truncate(handle)?
    };
    Ok(SinkKind::Object(writer))
}
