use std::cell::RefCell;

use optsift_getopt::table::{LongOpt, ShortOpt};

use crate::optspec::{Arity, LongSpec, ShortSpec};

/// Accumulates normalized option tokens as scan callbacks fire, then
/// renders the final `eval`-ready line.
///
/// Callbacks observe values, not spellings, so output is normalized: a
/// short-mode match prints `-c`, a long-mode match prints the canonical
/// `--name` whichever form the user typed. Values are always emitted as a
/// separate quoted word; an optional option with no value emits `''`.
pub struct Sink(RefCell<String>);

impl Sink {
    pub fn new() -> Self {
        Self(RefCell::new(String::new()))
    }

    /// Table entry for one optstring character, writing into this sink.
    pub fn short_opt(&self, spec: &ShortSpec) -> ShortOpt<'_> {
        let c = spec.name;
        match spec.arity {
            Arity::None => ShortOpt::flag(c, move || self.push_flag(&format!("-{c}"))),
            Arity::Optional => ShortOpt::optional(c, move |value: Option<&str>| {
                self.push_value(&format!("-{c}"), value.unwrap_or(""))
            }),
            Arity::Required => {
                ShortOpt::required(c, move |value: &str| self.push_value(&format!("-{c}"), value))
            }
        }
    }

    /// Table entry for one long option pair, writing into this sink.
    pub fn long_opt(&self, spec: &LongSpec) -> LongOpt<'_> {
        let label = format!("--{}", spec.name);
        match spec.arity {
            Arity::None => LongOpt::flag(spec.name.clone(), spec.short, move || {
                self.push_flag(&label)
            }),
            Arity::Optional => LongOpt::optional(
                spec.name.clone(),
                spec.short,
                move |value: Option<&str>| self.push_value(&label, value.unwrap_or("")),
            ),
            Arity::Required => LongOpt::required(spec.name.clone(), spec.short, move |value: &str| {
                self.push_value(&label, value)
            }),
        }
    }

    fn push_flag(&self, label: &str) {
        let mut line = self.0.borrow_mut();
        line.push(' ');
        line.push_str(label);
    }

    fn push_value(&self, label: &str, value: &str) {
        let mut line = self.0.borrow_mut();
        line.push(' ');
        line.push_str(label);
        line.push(' ');
        line.push_str(&quote(value));
    }

    /// Close the line: ` --` then the quoted leftover parameters.
    pub fn finish(self, operands: &[String]) -> String {
        let mut line = self.0.into_inner();
        line.push_str(" --");
        for word in operands {
            line.push(' ');
            line.push_str(&quote(word));
        }
        line
    }
}

/// Quote one word for the shell: wrap in single quotes, with embedded
/// single quotes rendered as `'\''`.
pub fn quote(word: &str) -> String {
    let mut out = String::with_capacity(word.len() + 2);
    out.push('\'');
    for c in word.chars() {
        if c == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(c);
        }
    }
    out.push('\'');
    out
}
