//! Help text and debug dumps for a set of declared options.

use std::fmt::Write;

use crate::option::{OptionDescriptor, OptionKind};

/// Layout of the generated help text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageStyle {
    /// First line of the help text.
    pub header: String,
    /// Column at which descriptions start.
    pub indent: usize,
    /// Long names are cut to this many characters.
    pub max_name: usize,
    /// Meta words are cut to this many characters.
    pub max_meta: usize,
}

impl Default for UsageStyle {
    fn default() -> Self {
        UsageStyle {
            header: "Options".to_string(),
            indent: 28,
            max_name: 64,
            max_meta: 32,
        }
    }
}

fn truncated(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Left column for one option, e.g. `  -b, --buffer-size=SIZE`.
fn signature(opt: &OptionDescriptor, style: &UsageStyle) -> String {
    let meta = opt.meta().filter(|_| opt.kind() != OptionKind::Flag);

    let mut s = String::from("  ");
    match opt.short() {
        Some(c) => {
            s.push('-');
            s.push(c);
        }
        None => s.push_str("  "),
    }

    match opt.long() {
        Some(name) => {
            s.push_str(if opt.short().is_some() { ", " } else { "  " });
            s.push_str("--");
            s.push_str(truncated(name, style.max_name));
            if let Some(meta) = meta {
                s.push('=');
                s.push_str(truncated(meta, style.max_meta));
            }
        }
        None => {
            if let Some(meta) = meta {
                s.push(' ');
                s.push_str(truncated(meta, style.max_meta));
            }
        }
    }
    s
}

/// Two-column help text, one entry per option in `options` order.
///
/// Signatures too wide for the left column get a line of their own and
/// the description continues underneath at the indent column.
pub fn render<'a, I>(options: I, style: &UsageStyle) -> String
where
    I: IntoIterator<Item = &'a OptionDescriptor>,
{
    let mut help = String::new();
    help.push_str(&style.header);
    help.push('\n');

    for opt in options {
        let sig = signature(opt, style);
        let width = sig.chars().count();
        help.push_str(&sig);
        if width + 2 <= style.indent {
            help.extend(std::iter::repeat(' ').take(style.indent - width));
        } else {
            help.push('\n');
            help.extend(std::iter::repeat(' ').take(style.indent));
        }
        help.push_str(opt.description());
        help.push('\n');
    }
    help
}

fn kind_label(kind: OptionKind) -> &'static str {
    match kind {
        OptionKind::Flag => "flag",
        OptionKind::Str => "str",
        OptionKind::Int => "int",
        OptionKind::Float => "float",
    }
}

/// Table of every option's current value plus the positional arguments.
pub fn dump<'a, I>(options: I, positionals: &[String]) -> String
where
    I: IntoIterator<Item = &'a OptionDescriptor>,
{
    let mut out = String::from("Options (letter, long-name, type, value, META, desc):\n");
    for opt in options {
        let _ = writeln!(
            out,
            "{}{:>20}{:>6}{:>10}{:>8}  {}",
            opt.short().unwrap_or('#'),
            opt.long().unwrap_or("NA"),
            kind_label(opt.kind()),
            opt.value().to_string(),
            opt.meta().unwrap_or("META"),
            opt.description()
        );
    }

    let _ = write!(out, "\n{} non-option arguments\n", positionals.len());
    for arg in positionals {
        let _ = writeln!(out, "  {}", arg);
    }
    out
}
