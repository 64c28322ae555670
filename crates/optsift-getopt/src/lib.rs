//! Callback-driven getopt-style argv scanning.
//!
//! This crate is intentionally small so it can be shared by:
//! - the `optsift` binary (to scan user-supplied parameter lists)
//! - anything else that wants classic `getopt`/`getopt_long` semantics
//!   without pulling in a full CLI framework
//!
//! A parse call walks an argument vector left to right, resolves each
//! option-like token against a caller-supplied table and invokes the
//! matching callback, then hands back the contiguous tail of arguments
//! that the scan did not consume. All scan state lives on the stack of
//! one call; repeated or concurrent calls cannot observe each other.
//!
//! ```
//! use optsift_getopt::{scan, table};
//!
//! let argv: Vec<String> = ["prog", "-v", "-n", "3", "input.txt"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//!
//! let mut verbose = 0u32;
//! let mut count = None;
//! let rest = {
//!     let mut opts = vec![
//!         table::ShortOpt::flag('v', || verbose += 1),
//!         table::ShortOpt::required('n', |v: &str| count = Some(v.to_string())),
//!     ];
//!     scan::parse_short(&argv, &mut opts).unwrap()
//! };
//! assert_eq!(verbose, 1);
//! assert_eq!(count.as_deref(), Some("3"));
//! assert_eq!(rest, ["input.txt"]);
//! ```

pub mod table {
    //! Option descriptors supplied by the caller before a scan.

    /// What an option does with its value, and the callback to run when the
    /// option is recognized.
    ///
    /// Merging the argument policy and the callback into one enum means a
    /// descriptor holds exactly one policy, enforced at construction: a
    /// no-argument option cannot be handed a value and a required-argument
    /// option cannot be invoked without one.
    pub enum Handler<'h> {
        /// The option takes no value.
        Flag(Box<dyn FnMut() + 'h>),
        /// The option takes a value only when it is attached to the token
        /// itself (`-ovalue`, `--opt=value`). A bare occurrence dispatches
        /// `None`; the following argv token is never consumed.
        Optional(Box<dyn FnMut(Option<&str>) + 'h>),
        /// The option requires a value, attached or taken from the following
        /// argv token.
        Required(Box<dyn FnMut(&str) + 'h>),
    }

    /// One recognized single-character option, e.g. `-x`.
    ///
    /// Names must be unique within one table; a duplicate is a caller
    /// contract violation and the first matching entry wins.
    pub struct ShortOpt<'h> {
        pub(crate) name: char,
        pub(crate) handler: Handler<'h>,
    }

    impl<'h> ShortOpt<'h> {
        /// An option that takes no value.
        pub fn flag(name: char, run: impl FnMut() + 'h) -> Self {
            Self {
                name,
                handler: Handler::Flag(Box::new(run)),
            }
        }

        /// An option whose value is optional and attach-only (`-xvalue`).
        pub fn optional(name: char, run: impl FnMut(Option<&str>) + 'h) -> Self {
            Self {
                name,
                handler: Handler::Optional(Box::new(run)),
            }
        }

        /// An option that requires a value (`-xvalue` or `-x value`).
        pub fn required(name: char, run: impl FnMut(&str) + 'h) -> Self {
            Self {
                name,
                handler: Handler::Required(Box::new(run)),
            }
        }
    }

    /// One recognized long option, e.g. `--level`, paired with its
    /// equivalent short character.
    ///
    /// The short equivalent participates in short-cluster scanning exactly
    /// as a [`ShortOpt`] of the same policy would, so `-l` and `--level`
    /// dispatch to the same handler.
    pub struct LongOpt<'h> {
        pub(crate) name: String,
        pub(crate) short: char,
        pub(crate) handler: Handler<'h>,
    }

    impl<'h> LongOpt<'h> {
        /// An option that takes no value.
        pub fn flag(name: impl Into<String>, short: char, run: impl FnMut() + 'h) -> Self {
            Self {
                name: name.into(),
                short,
                handler: Handler::Flag(Box::new(run)),
            }
        }

        /// An option whose value is optional: `--name=value` supplies it,
        /// bare `--name` (and the bare short form) dispatches `None`.
        pub fn optional(
            name: impl Into<String>,
            short: char,
            run: impl FnMut(Option<&str>) + 'h,
        ) -> Self {
            Self {
                name: name.into(),
                short,
                handler: Handler::Optional(Box::new(run)),
            }
        }

        /// An option that requires a value: `--name=value` or `--name value`.
        pub fn required(
            name: impl Into<String>,
            short: char,
            run: impl FnMut(&str) + 'h,
        ) -> Self {
            Self {
                name: name.into(),
                short,
                handler: Handler::Required(Box::new(run)),
            }
        }
    }

    impl<'h> crate::scan::Desc<'h> for ShortOpt<'h> {
        fn short(&self) -> char {
            self.name
        }

        fn long(&self) -> Option<&str> {
            None
        }

        fn handler_mut(&mut self) -> &mut Handler<'h> {
            &mut self.handler
        }
    }

    impl<'h> crate::scan::Desc<'h> for LongOpt<'h> {
        fn short(&self) -> char {
            self.short
        }

        fn long(&self) -> Option<&str> {
            Some(&self.name)
        }

        fn handler_mut(&mut self) -> &mut Handler<'h> {
            &mut self.handler
        }
    }
}

pub mod scan {
    //! The scan loop: argv in, callback dispatches out, leftover tail back.

    use std::fmt;

    use super::table::{Handler, LongOpt, ShortOpt};

    /// An option name as it appeared (or failed to appear) in argv.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum OptName {
        Short(char),
        Long(String),
    }

    impl fmt::Display for OptName {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::Short(c) => write!(f, "-{c}"),
                Self::Long(name) => write!(f, "--{name}"),
            }
        }
    }

    /// A failed scan. The call stops at the offending token; callbacks
    /// already dispatched keep their side effects.
    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    pub enum Error {
        /// An option-like token matched no descriptor in the table. Also
        /// covers an ambiguous abbreviation and a value attached to a
        /// no-argument long option.
        #[error("unrecognized option '{0}'")]
        UnknownOption(OptName),
        /// A required-argument option appeared with no value available.
        #[error("option '{0}' requires an argument")]
        MissingArgument(OptName),
    }

    pub(crate) trait Desc<'h> {
        fn short(&self) -> char;
        fn long(&self) -> Option<&str>;
        fn handler_mut(&mut self) -> &mut Handler<'h>;
    }

    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mode {
        Short,
        Long,
        LongOnly,
    }

    /// Scan `argv` against a short-option table.
    ///
    /// `argv[0]` is the conventional program-name slot and is always
    /// skipped; callers passing a bare argument list must prepend a
    /// placeholder or the first real argument is silently skipped.
    ///
    /// Scanning stops at the first token that is not option-like, at `--`
    /// (which is consumed), or at a lone `-` (which is not). The returned
    /// slice is the contiguous tail of `argv` from that point on: operands
    /// appearing before a later option are *not* re-ordered or collected
    /// individually, matching the conventional permutation-free single-pass
    /// contract.
    pub fn parse_short<'a, 'h>(
        argv: &'a [String],
        opts: &mut [ShortOpt<'h>],
    ) -> Result<&'a [String], Error> {
        scan_table(argv, opts, Mode::Short)
    }

    /// Scan `argv` against a long-option table.
    ///
    /// Same contract as [`parse_short`], with long tokens added: exact
    /// `--name`, `--name=value`, and `--name value` (required-argument
    /// options only). Optional values come from `=value` alone. Short
    /// clusters are still scanned through each descriptor's equivalent
    /// character. No abbreviation: `--name` must match a declared name
    /// exactly.
    pub fn parse_long<'a, 'h>(
        argv: &'a [String],
        opts: &mut [LongOpt<'h>],
    ) -> Result<&'a [String], Error> {
        scan_table(argv, opts, Mode::Long)
    }

    /// Scan `argv` against a long-option table, recognizing single-dash
    /// long options and unambiguous abbreviations.
    ///
    /// In addition to everything [`parse_long`] accepts, `-name` is matched
    /// against the long names, and any unambiguous prefix of a long name
    /// matches it. A single-dash token that matches no long name falls back
    /// to short-cluster scanning when its first character is a declared
    /// short equivalent; a lone `-c` whose character is declared short is
    /// always taken as the short option.
    pub fn parse_long_only<'a, 'h>(
        argv: &'a [String],
        opts: &mut [LongOpt<'h>],
    ) -> Result<&'a [String], Error> {
        scan_table(argv, opts, Mode::LongOnly)
    }

    fn scan_table<'a, 'h, D: Desc<'h>>(
        argv: &'a [String],
        opts: &mut [D],
        mode: Mode,
    ) -> Result<&'a [String], Error> {
        let mut cursor = 1usize;
        while cursor < argv.len() {
            let arg = argv[cursor].as_str();
            if arg == "--" {
                cursor += 1;
                break;
            }
            if arg == "-" || !arg.starts_with('-') {
                break;
            }
            cursor = if let Some(body) = arg.strip_prefix("--") {
                match mode {
                    // A plain short scan has no long tokens: `--x` is the
                    // cluster `-x` whose first option character is `-`.
                    Mode::Short => take_cluster(argv, cursor, &arg[1..], opts)?,
                    Mode::Long => take_long(argv, cursor, body, opts, false)?,
                    Mode::LongOnly => take_long(argv, cursor, body, opts, true)?,
                }
            } else {
                let body = &arg[1..];
                match mode {
                    Mode::LongOnly => take_dash_long(argv, cursor, body, opts)?,
                    _ => take_cluster(argv, cursor, body, opts)?,
                }
            };
        }
        tracing::trace!(cursor, total = argv.len(), "option scan complete");
        Ok(tail(argv, cursor))
    }

    /// Dispatch one short cluster (the token minus its leading dash).
    /// Returns the cursor for the next token.
    fn take_cluster<'h, D: Desc<'h>>(
        argv: &[String],
        cursor: usize,
        cluster: &str,
        opts: &mut [D],
    ) -> Result<usize, Error> {
        let mut chars = cluster.char_indices();
        while let Some((at, c)) = chars.next() {
            let opt = opts
                .iter_mut()
                .find(|o| o.short() == c)
                .ok_or(Error::UnknownOption(OptName::Short(c)))?;
            let attached = &cluster[at + c.len_utf8()..];
            match opt.handler_mut() {
                Handler::Flag(run) => {
                    tracing::trace!(option = %c, "dispatch flag");
                    run();
                }
                Handler::Optional(run) => {
                    let value = (!attached.is_empty()).then_some(attached);
                    tracing::trace!(option = %c, ?value, "dispatch optional");
                    run(value);
                    return Ok(cursor + 1);
                }
                Handler::Required(run) => {
                    if !attached.is_empty() {
                        tracing::trace!(option = %c, value = attached, "dispatch required");
                        run(attached);
                        return Ok(cursor + 1);
                    }
                    let Some(value) = argv.get(cursor + 1) else {
                        return Err(Error::MissingArgument(OptName::Short(c)));
                    };
                    tracing::trace!(option = %c, value = %value, "dispatch required");
                    run(value);
                    return Ok(cursor + 2);
                }
            }
        }
        Ok(cursor + 1)
    }

    /// Dispatch one long token (minus its dashes). Returns the cursor for
    /// the next token.
    fn take_long<'h, D: Desc<'h>>(
        argv: &[String],
        cursor: usize,
        body: &str,
        opts: &mut [D],
        abbreviate: bool,
    ) -> Result<usize, Error> {
        let (name, attached) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };
        let index = match resolve_long(opts, name, abbreviate) {
            LongMatch::One(index) => index,
            LongMatch::None | LongMatch::Ambiguous => {
                return Err(Error::UnknownOption(OptName::Long(name.to_string())));
            }
        };
        // An abbreviation reports errors under the declared name.
        let canonical = match opts[index].long() {
            Some(long) => long.to_string(),
            None => name.to_string(),
        };
        tracing::trace!(option = %canonical, ?attached, "long option matched");
        match opts[index].handler_mut() {
            Handler::Flag(run) => {
                if attached.is_some() {
                    return Err(Error::UnknownOption(OptName::Long(name.to_string())));
                }
                run();
                Ok(cursor + 1)
            }
            Handler::Optional(run) => {
                run(attached);
                Ok(cursor + 1)
            }
            Handler::Required(run) => {
                if let Some(value) = attached {
                    run(value);
                    return Ok(cursor + 1);
                }
                let Some(value) = argv.get(cursor + 1) else {
                    return Err(Error::MissingArgument(OptName::Long(canonical)));
                };
                run(value);
                Ok(cursor + 2)
            }
        }
    }

    /// Dispatch a single-dash token in long-only mode: long interpretation
    /// first, short-cluster fallback when the long names say nothing.
    fn take_dash_long<'h, D: Desc<'h>>(
        argv: &[String],
        cursor: usize,
        body: &str,
        opts: &mut [D],
    ) -> Result<usize, Error> {
        let mut chars = body.chars();
        let first = chars.next();
        // `-c` for a declared short character is always the short option,
        // even when c abbreviates a long name.
        if chars.next().is_none() {
            if let Some(c) = first {
                if opts.iter().any(|o| o.short() == c) {
                    return take_cluster(argv, cursor, body, opts);
                }
            }
        }
        let name = match body.split_once('=') {
            Some((name, _)) => name,
            None => body,
        };
        match resolve_long(opts, name, true) {
            LongMatch::One(_) => take_long(argv, cursor, body, opts, true),
            LongMatch::Ambiguous => Err(Error::UnknownOption(OptName::Long(name.to_string()))),
            LongMatch::None => match first {
                Some(c) if opts.iter().any(|o| o.short() == c) => {
                    take_cluster(argv, cursor, body, opts)
                }
                _ => Err(Error::UnknownOption(OptName::Long(name.to_string()))),
            },
        }
    }

    enum LongMatch {
        One(usize),
        Ambiguous,
        None,
    }

    fn resolve_long<'h, D: Desc<'h>>(opts: &[D], name: &str, abbreviate: bool) -> LongMatch {
        let mut prefix = None;
        let mut ambiguous = false;
        for (index, opt) in opts.iter().enumerate() {
            let Some(long) = opt.long() else {
                continue;
            };
            if long == name {
                return LongMatch::One(index);
            }
            if abbreviate && long.starts_with(name) {
                if prefix.is_some() {
                    ambiguous = true;
                } else {
                    prefix = Some(index);
                }
            }
        }
        if ambiguous {
            LongMatch::Ambiguous
        } else if let Some(index) = prefix {
            LongMatch::One(index)
        } else {
            LongMatch::None
        }
    }

    /// The remaining arguments from `start`, clamped: the scan may leave
    /// the cursor one past the end after consuming a detached value.
    fn tail(argv: &[String], start: usize) -> &[String] {
        if start >= argv.len() {
            &argv[argv.len()..]
        } else {
            &argv[start..]
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::scan::{self, Error, OptName};
    use super::table::{LongOpt, ShortOpt};

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    /// Journal of callback invocations, in dispatch order.
    struct Journal(RefCell<Vec<String>>);

    impl Journal {
        fn new() -> Self {
            Self(RefCell::new(Vec::new()))
        }

        fn flag(&self, name: &str) -> impl FnMut() {
            let name = name.to_string();
            move || self.0.borrow_mut().push(name.clone())
        }

        fn optional(&self, name: &str) -> impl FnMut(Option<&str>) {
            let name = name.to_string();
            move |value: Option<&str>| {
                self.0
                    .borrow_mut()
                    .push(format!("{name}={}", value.unwrap_or("<none>")))
            }
        }

        fn required(&self, name: &str) -> impl FnMut(&str) {
            let name = name.to_string();
            move |value: &str| self.0.borrow_mut().push(format!("{name}={value}"))
        }

        fn entries(&self) -> Vec<String> {
            self.0.borrow().clone()
        }
    }

    #[test]
    fn no_option_tokens_leaves_argv_untouched() {
        let journal = Journal::new();
        let args = argv(&["prog", "alpha", "beta"]);
        let mut opts = vec![ShortOpt::flag('a', journal.flag("a"))];
        let rest = scan::parse_short(&args, &mut opts).unwrap();
        assert_eq!(rest, ["alpha", "beta"]);
        assert!(journal.entries().is_empty());
    }

    #[test]
    fn flags_dispatch_in_argv_order() {
        let journal = Journal::new();
        let args = argv(&["prog", "-b", "-a", "-b"]);
        let mut opts = vec![
            ShortOpt::flag('a', journal.flag("a")),
            ShortOpt::flag('b', journal.flag("b")),
        ];
        let rest = scan::parse_short(&args, &mut opts).unwrap();
        assert!(rest.is_empty());
        assert_eq!(journal.entries(), ["b", "a", "b"]);
    }

    #[test]
    fn combined_cluster_dispatches_each_flag() {
        let journal = Journal::new();
        let args = argv(&["prog", "-ab"]);
        let mut opts = vec![
            ShortOpt::flag('a', journal.flag("a")),
            ShortOpt::flag('b', journal.flag("b")),
        ];
        let rest = scan::parse_short(&args, &mut opts).unwrap();
        assert!(rest.is_empty());
        assert_eq!(journal.entries(), ["a", "b"]);
    }

    #[test]
    fn required_value_from_next_token() {
        let journal = Journal::new();
        let args = argv(&["prog", "-x", "val"]);
        let mut opts = vec![ShortOpt::required('x', journal.required("x"))];
        let rest = scan::parse_short(&args, &mut opts).unwrap();
        assert!(rest.is_empty());
        assert_eq!(journal.entries(), ["x=val"]);
    }

    #[test]
    fn required_value_attached_to_cluster() {
        let journal = Journal::new();
        let args = argv(&["prog", "-xval", "tail"]);
        let mut opts = vec![ShortOpt::required('x', journal.required("x"))];
        let rest = scan::parse_short(&args, &mut opts).unwrap();
        assert_eq!(rest, ["tail"]);
        assert_eq!(journal.entries(), ["x=val"]);
    }

    #[test]
    fn flag_then_required_in_one_cluster() {
        let journal = Journal::new();
        let args = argv(&["prog", "-ax", "val"]);
        let mut opts = vec![
            ShortOpt::flag('a', journal.flag("a")),
            ShortOpt::required('x', journal.required("x")),
        ];
        let rest = scan::parse_short(&args, &mut opts).unwrap();
        assert!(rest.is_empty());
        assert_eq!(journal.entries(), ["a", "x=val"]);
    }

    #[test]
    fn required_value_missing_is_an_error() {
        let journal = Journal::new();
        let args = argv(&["prog", "-x"]);
        let mut opts = vec![ShortOpt::required('x', journal.required("x"))];
        let err = scan::parse_short(&args, &mut opts).unwrap_err();
        assert_eq!(err, Error::MissingArgument(OptName::Short('x')));
    }

    #[test]
    fn unknown_short_option_is_an_error() {
        let journal = Journal::new();
        let args = argv(&["prog", "-z"]);
        let mut opts = vec![ShortOpt::flag('a', journal.flag("a"))];
        let err = scan::parse_short(&args, &mut opts).unwrap_err();
        assert_eq!(err, Error::UnknownOption(OptName::Short('z')));
    }

    #[test]
    fn dispatches_before_an_error_are_kept() {
        let journal = Journal::new();
        let args = argv(&["prog", "-a", "-z"]);
        let mut opts = vec![ShortOpt::flag('a', journal.flag("a"))];
        let err = scan::parse_short(&args, &mut opts).unwrap_err();
        assert_eq!(err, Error::UnknownOption(OptName::Short('z')));
        assert_eq!(journal.entries(), ["a"]);
    }

    #[test]
    fn optional_short_value_attaches_only() {
        let journal = Journal::new();
        let args = argv(&["prog", "-oval", "-o", "free"]);
        let mut opts = vec![ShortOpt::optional('o', journal.optional("o"))];
        let rest = scan::parse_short(&args, &mut opts).unwrap();
        assert_eq!(rest, ["free"]);
        assert_eq!(journal.entries(), ["o=val", "o=<none>"]);
    }

    #[test]
    fn remainder_is_the_contiguous_tail() {
        let journal = Journal::new();
        let args = argv(&["prog", "-a", "pos1", "pos2"]);
        let mut opts = vec![ShortOpt::flag('a', journal.flag("a"))];
        let rest = scan::parse_short(&args, &mut opts).unwrap();
        assert_eq!(rest, ["pos1", "pos2"]);
    }

    #[test]
    fn operands_before_later_options_are_not_collected() {
        let journal = Journal::new();
        let args = argv(&["prog", "-a", "pos1", "-b", "pos2"]);
        let mut opts = vec![
            ShortOpt::flag('a', journal.flag("a")),
            ShortOpt::flag('b', journal.flag("b")),
        ];
        let rest = scan::parse_short(&args, &mut opts).unwrap();
        assert_eq!(rest, ["pos1", "-b", "pos2"]);
        assert_eq!(journal.entries(), ["a"]);
    }

    #[test]
    fn double_dash_ends_options_and_is_consumed() {
        let journal = Journal::new();
        let args = argv(&["prog", "-a", "--", "-b", "x"]);
        let mut opts = vec![
            ShortOpt::flag('a', journal.flag("a")),
            ShortOpt::flag('b', journal.flag("b")),
        ];
        let rest = scan::parse_short(&args, &mut opts).unwrap();
        assert_eq!(rest, ["-b", "x"]);
        assert_eq!(journal.entries(), ["a"]);
    }

    #[test]
    fn lone_dash_ends_options_unconsumed() {
        let journal = Journal::new();
        let args = argv(&["prog", "-a", "-", "x"]);
        let mut opts = vec![ShortOpt::flag('a', journal.flag("a"))];
        let rest = scan::parse_short(&args, &mut opts).unwrap();
        assert_eq!(rest, ["-", "x"]);
    }

    #[test]
    fn empty_and_program_only_argv() {
        let journal = Journal::new();
        let mut opts = vec![ShortOpt::flag('a', journal.flag("a"))];
        let none: Vec<String> = Vec::new();
        assert!(scan::parse_short(&none, &mut opts).unwrap().is_empty());
        let args = argv(&["prog"]);
        assert!(scan::parse_short(&args, &mut opts).unwrap().is_empty());
    }

    #[test]
    fn reparse_is_stateless() {
        for _ in 0..2 {
            let journal = Journal::new();
            let args = argv(&["prog", "-ab", "tail"]);
            let mut opts = vec![
                ShortOpt::flag('a', journal.flag("a")),
                ShortOpt::flag('b', journal.flag("b")),
            ];
            let rest = scan::parse_short(&args, &mut opts).unwrap();
            assert_eq!(rest, ["tail"]);
            assert_eq!(journal.entries(), ["a", "b"]);
        }
    }

    #[test]
    fn long_optional_value_via_equals_only() {
        let journal = Journal::new();
        let mut opts = vec![LongOpt::optional("level", 'l', journal.optional("level"))];
        let args = argv(&["prog", "--level=5"]);
        let rest = scan::parse_long(&args, &mut opts).unwrap();
        assert!(rest.is_empty());
        let args = argv(&["prog", "--level", "free"]);
        let rest = scan::parse_long(&args, &mut opts).unwrap();
        assert_eq!(rest, ["free"]);
        assert_eq!(journal.entries(), ["level=5", "level=<none>"]);
    }

    #[test]
    fn long_required_value_both_forms() {
        let journal = Journal::new();
        let mut opts = vec![LongOpt::required("output", 'o', journal.required("output"))];
        let args = argv(&["prog", "--output=a.txt", "--output", "b.txt", "tail"]);
        let rest = scan::parse_long(&args, &mut opts).unwrap();
        assert_eq!(rest, ["tail"]);
        assert_eq!(journal.entries(), ["output=a.txt", "output=b.txt"]);
    }

    #[test]
    fn long_required_value_missing_is_an_error() {
        let journal = Journal::new();
        let mut opts = vec![LongOpt::required("output", 'o', journal.required("output"))];
        let args = argv(&["prog", "--output"]);
        let err = scan::parse_long(&args, &mut opts).unwrap_err();
        assert_eq!(err, Error::MissingArgument(OptName::Long("output".into())));
    }

    #[test]
    fn unknown_long_option_is_an_error() {
        let journal = Journal::new();
        let mut opts = vec![LongOpt::flag("all", 'a', journal.flag("all"))];
        let args = argv(&["prog", "--bogus"]);
        let err = scan::parse_long(&args, &mut opts).unwrap_err();
        assert_eq!(err, Error::UnknownOption(OptName::Long("bogus".into())));
    }

    #[test]
    fn long_flag_rejects_attached_value() {
        let journal = Journal::new();
        let mut opts = vec![LongOpt::flag("all", 'a', journal.flag("all"))];
        let args = argv(&["prog", "--all=yes"]);
        let err = scan::parse_long(&args, &mut opts).unwrap_err();
        assert_eq!(err, Error::UnknownOption(OptName::Long("all".into())));
        assert!(journal.entries().is_empty());
    }

    #[test]
    fn parse_long_requires_exact_names() {
        let journal = Journal::new();
        let mut opts = vec![LongOpt::flag("output", 'o', journal.flag("output"))];
        let args = argv(&["prog", "--out"]);
        let err = scan::parse_long(&args, &mut opts).unwrap_err();
        assert_eq!(err, Error::UnknownOption(OptName::Long("out".into())));
    }

    #[test]
    fn long_table_short_equivalents_cluster() {
        let journal = Journal::new();
        let mut opts = vec![
            LongOpt::flag("all", 'a', journal.flag("all")),
            LongOpt::required("output", 'o', journal.required("output")),
        ];
        let args = argv(&["prog", "-ao", "f.txt", "tail"]);
        let rest = scan::parse_long(&args, &mut opts).unwrap();
        assert_eq!(rest, ["tail"]);
        assert_eq!(journal.entries(), ["all", "output=f.txt"]);
    }

    #[test]
    fn long_only_matches_unambiguous_prefix() {
        let journal = Journal::new();
        let mut opts = vec![
            LongOpt::required("output", 'o', journal.required("output")),
            LongOpt::flag("all", 'a', journal.flag("all")),
        ];
        let args = argv(&["prog", "--out", "f.txt", "-al"]);
        let rest = scan::parse_long_only(&args, &mut opts).unwrap();
        assert!(rest.is_empty());
        assert_eq!(journal.entries(), ["output=f.txt", "all"]);
    }

    #[test]
    fn long_only_missing_value_reports_declared_name() {
        let journal = Journal::new();
        let mut opts = vec![LongOpt::required("output", 'o', journal.required("output"))];
        let args = argv(&["prog", "--out"]);
        let err = scan::parse_long_only(&args, &mut opts).unwrap_err();
        assert_eq!(err, Error::MissingArgument(OptName::Long("output".into())));
    }

    #[test]
    fn long_only_ambiguous_prefix_is_unknown() {
        let journal = Journal::new();
        let mut opts = vec![
            LongOpt::flag("verbose", 'v', journal.flag("verbose")),
            LongOpt::flag("version", 'V', journal.flag("version")),
        ];
        let args = argv(&["prog", "--ver"]);
        let err = scan::parse_long_only(&args, &mut opts).unwrap_err();
        assert_eq!(err, Error::UnknownOption(OptName::Long("ver".into())));
    }

    #[test]
    fn long_only_single_char_prefers_declared_short() {
        let journal = Journal::new();
        let mut opts = vec![
            LongOpt::required("value", 'x', journal.required("value")),
            LongOpt::flag("verbose", 'v', journal.flag("verbose")),
        ];
        let args = argv(&["prog", "-v"]);
        let rest = scan::parse_long_only(&args, &mut opts).unwrap();
        assert!(rest.is_empty());
        assert_eq!(journal.entries(), ["verbose"]);
    }

    #[test]
    fn long_only_falls_back_to_short_cluster() {
        let journal = Journal::new();
        let mut opts = vec![
            LongOpt::flag("all", 'a', journal.flag("all")),
            LongOpt::flag("brief", 'b', journal.flag("brief")),
        ];
        let args = argv(&["prog", "-ab"]);
        let rest = scan::parse_long_only(&args, &mut opts).unwrap();
        assert!(rest.is_empty());
        assert_eq!(journal.entries(), ["all", "brief"]);
    }

    #[test]
    fn error_messages_name_the_option() {
        assert_eq!(
            Error::UnknownOption(OptName::Short('z')).to_string(),
            "unrecognized option '-z'"
        );
        assert_eq!(
            Error::MissingArgument(OptName::Long("output".into())).to_string(),
            "option '--output' requires an argument"
        );
    }
}
