use anyhow::{Result, bail};

/// Whether an option consumes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    None,
    Optional,
    Required,
}

/// One entry parsed out of an `-o` optstring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortSpec {
    pub name: char,
    pub arity: Arity,
}

/// One entry parsed out of an `-l` list: a long name plus the short
/// character it is equivalent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongSpec {
    pub name: String,
    pub short: char,
    pub arity: Arity,
}

/// Parse a getopt-style optstring, e.g. `ab:c::` declares `-a` as a flag,
/// `-b` with a required value and `-c` with an optional one.
///
/// A leading `+` is accepted and ignored: it selects stop-at-first-operand
/// scanning elsewhere, which is the only mode optsift has.
pub fn parse_optstring(s: &str) -> Result<Vec<ShortSpec>> {
    let mut out: Vec<ShortSpec> = Vec::new();
    let mut chars = s.strip_prefix('+').unwrap_or(s).chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' {
            bail!("optstring '{s}': ':' must follow an option character");
        }
        let mut arity = Arity::None;
        if chars.peek() == Some(&':') {
            chars.next();
            arity = Arity::Required;
            if chars.peek() == Some(&':') {
                chars.next();
                arity = Arity::Optional;
            }
        }
        out.push(ShortSpec { name: c, arity });
    }
    if out.is_empty() {
        bail!("optstring is empty");
    }
    Ok(out)
}

/// Parse a comma-separated long option list, e.g. `a=all,o=output:,v=level::`.
///
/// Each entry pairs the long name with its single-character short
/// equivalent; a trailing `:` marks a required value, `::` an optional one.
/// Empty entries are skipped so trailing commas are harmless.
pub fn parse_longoptions(list: &str) -> Result<Vec<LongSpec>> {
    let mut out: Vec<LongSpec> = Vec::new();
    for entry in list.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let Some((short, rest)) = entry.split_once('=') else {
            bail!("long option '{entry}': expected SHORT=NAME");
        };
        let mut short_chars = short.chars();
        let short = match (short_chars.next(), short_chars.next()) {
            (Some(c), None) => c,
            _ => bail!("long option '{entry}': short equivalent must be one character"),
        };
        let (long, arity) = if let Some(long) = rest.strip_suffix("::") {
            (long, Arity::Optional)
        } else if let Some(long) = rest.strip_suffix(':') {
            (long, Arity::Required)
        } else {
            (rest, Arity::None)
        };
        if long.is_empty() || long.starts_with('-') || long.contains('=') {
            bail!("long option '{entry}': invalid name '{long}'");
        }
        out.push(LongSpec {
            name: long.to_string(),
            short,
            arity,
        });
    }
    if out.is_empty() {
        bail!("long option list '{list}' is empty");
    }
    Ok(out)
}
