//! Scanner turning argument text and one definition into a match result.
//!
//! A single left-to-right pass, never backtracking. At each token start:
//!
//! ```text
//! content flag pending? → swallow rest, stop
//! token = literal | flag | value
//! flag                  → resolve previous pending flag as true, look up new one
//! content argument due  → swallow rest (from this token), stop
//! literal | value       → pending flag, else next argument, else unknown
//! ```
//!
//! A flag left pending at the end of input resolves to `true`.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::matcher::patterns::{Patterns, Token, TokenKind};
use crate::matcher::result::{FieldValue, MatchResult, Unknown};
use crate::registry::{Definition, Field, FieldKind};

/// Scan `raw` (the text after the command name) against `definition`.
pub fn scan(patterns: &Patterns, definition: &Arc<Definition>, raw: &str) -> MatchResult {
    let mut scanner = Scanner::new(patterns, definition, raw);
    scanner.run();

    MatchResult {
        definition: Arc::clone(definition),
        args: scanner.args,
        flags: scanner.flags,
        unknowns: scanner.unknowns,
    }
}

struct Scanner<'a> {
    patterns: &'a Patterns,
    definition: &'a Definition,
    raw: &'a str,

    /// Byte offset of the next token
    pos: usize,
    /// Index of the next unfilled argument
    arg_cursor: usize,
    /// Flag recognized but not yet given a value
    pending: Option<&'a Field>,

    args: BTreeMap<String, FieldValue>,
    flags: BTreeMap<String, FieldValue>,
    unknowns: Vec<Unknown>,
}

impl<'a> Scanner<'a> {
    fn new(patterns: &'a Patterns, definition: &'a Definition, raw: &'a str) -> Self {
        Self {
            patterns,
            definition,
            raw,
            pos: 0,
            arg_cursor: 0,
            pending: None,
            args: BTreeMap::new(),
            flags: BTreeMap::new(),
            unknowns: Vec::new(),
        }
    }

    fn run(&mut self) {
        loop {
            // (--flag match content)
            if let Some(flag) = self.pending.filter(|f| f.kind == FieldKind::Content) {
                self.pending = None;
                let rest = self.rest().to_string();
                self.flags.insert(flag.name.clone(), FieldValue::Text(rest));
                return;
            }

            self.pos = self.patterns.skip_delimiters(self.raw, self.pos);
            let Some(token) = self.patterns.token_at(self.raw, self.pos) else {
                break;
            };

            tracing::trace!(
                definition = %self.definition.name,
                kind = ?token.kind,
                text = token.text,
                "Scanned token"
            );

            if token.kind == TokenKind::Flag {
                self.on_flag(token.text);
                self.pos = token.end;
                continue;
            }

            // (match content)
            if self.pending.is_none() {
                if let Some(arg) = self.current_arg().filter(|a| a.kind == FieldKind::Content) {
                    let rest = self.rest().to_string();
                    self.args.insert(arg.name.clone(), FieldValue::Text(rest));
                    return;
                }
            }

            self.on_value(&token);
            self.pos = token.end;
        }

        // (--booleanFlag) at end of input
        if let Some(flag) = self.pending.take() {
            self.flags.insert(flag.name.clone(), FieldValue::Bool(true));
        }
    }

    fn on_flag(&mut self, name: &str) {
        // (--booleanFlag --next): implicit boolean
        if let Some(previous) = self.pending.take() {
            self.flags.insert(previous.name.clone(), FieldValue::Bool(true));
        }

        let definition = self.definition;
        match definition.flag(name) {
            Some(flag) if flag.kind == FieldKind::Boolean => {
                self.flags.insert(flag.name.clone(), FieldValue::Bool(true));
            }
            Some(flag) => self.pending = Some(flag),
            None => self.push_unknown(Unknown::Flag(name.to_string())),
        }
    }

    fn on_value(&mut self, token: &Token<'_>) {
        if let Some(flag) = self.pending.take() {
            self.flags.insert(flag.name.clone(), resolve(flag, token));
        } else if let Some(arg) = self.current_arg() {
            self.args.insert(arg.name.clone(), resolve(arg, token));
            self.arg_cursor += 1;
        } else {
            self.push_unknown(Unknown::Arg(token.text.to_string()));
        }
    }

    fn push_unknown(&mut self, unknown: Unknown) {
        tracing::debug!(
            definition = %self.definition.name,
            raw = unknown.raw(),
            "Token fits no declared field"
        );
        self.unknowns.push(unknown);
    }

    fn current_arg(&self) -> Option<&'a Field> {
        let definition = self.definition;
        definition.args.get(self.arg_cursor)
    }

    fn rest(&self) -> &'a str {
        &self.raw[self.pos..]
    }
}

/// Literals are taken verbatim; plain values are split for list fields.
fn resolve(field: &Field, token: &Token<'_>) -> FieldValue {
    match (&field.kind, token.kind) {
        (FieldKind::List { delimiter }, TokenKind::Value) => FieldValue::List(
            token
                .text
                .split(delimiter.as_str())
                .map(String::from)
                .collect(),
        ),
        _ => FieldValue::Text(token.text.to_string()),
    }
}
