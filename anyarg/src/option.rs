//! Option descriptors and the values they hold.
//!
//! An option's kind is never stored on its own: it is the variant of the
//! [`OptionValue`] the descriptor carries, so the two cannot disagree.

use std::fmt;

use crate::error::{Error, Result};

const NO_DESCRIPTION: &str = "No description.";

// ============================================================================
// OptionKind / OptionValue
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Flag,
    Str,
    Int,
    Float,
}

impl OptionKind {
    pub fn takes_value(self) -> bool {
        !matches!(self, OptionKind::Flag)
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OptionKind::Flag => "a flag",
            OptionKind::Str => "a string option",
            OptionKind::Int => "an integer option",
            OptionKind::Float => "a float option",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Flag(bool),
    Str(String),
    Int(i64),
    Float(f64),
}

impl OptionValue {
    pub fn kind(&self) -> OptionKind {
        match self {
            OptionValue::Flag(_) => OptionKind::Flag,
            OptionValue::Str(_) => OptionKind::Str,
            OptionValue::Int(_) => OptionKind::Int,
            OptionValue::Float(_) => OptionKind::Float,
        }
    }

    /// Convert command-line text into a value of `kind`.
    ///
    /// Numbers are read best-effort from the longest numeric prefix, so
    /// `"12abc"` is 12 and `"abc"` is 0. Empty text is rejected; `key` only
    /// names the option in that error.
    pub fn coerce(kind: OptionKind, text: &str, key: &OptionKey) -> Result<OptionValue> {
        if text.is_empty() {
            return Err(Error::EmptyValue(key.clone()));
        }
        Ok(match kind {
            OptionKind::Flag => OptionValue::Flag(text == "true"),
            OptionKind::Str => OptionValue::Str(text.to_string()),
            OptionKind::Int => OptionValue::Int(leading_int(text)),
            OptionKind::Float => OptionValue::Float(leading_float(text)),
        })
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Flag(b) => write!(f, "{}", b),
            OptionValue::Str(s) => f.write_str(s),
            OptionValue::Int(n) => write!(f, "{}", n),
            OptionValue::Float(n) => write!(f, "{:.6}", n),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Flag(b)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Str(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Str(s)
    }
}

impl From<i64> for OptionValue {
    fn from(n: i64) -> Self {
        OptionValue::Int(n)
    }
}

impl From<i32> for OptionValue {
    fn from(n: i32) -> Self {
        OptionValue::Int(n.into())
    }
}

impl From<f64> for OptionValue {
    fn from(n: f64) -> Self {
        OptionValue::Float(n)
    }
}

// ============================================================================
// Numeric prefixes
// ============================================================================

/// Length of the run of ASCII digits at the start of `b`.
fn digit_run(b: &[u8]) -> usize {
    b.iter().take_while(|c| c.is_ascii_digit()).count()
}

/// Optional leading whitespace, then an optional sign.
fn split_sign(text: &str) -> (bool, &str) {
    let s = text.trim_start();
    match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    }
}

fn leading_int(text: &str) -> i64 {
    let (negative, rest) = split_sign(text);
    let digits = &rest[..digit_run(rest.as_bytes())];

    let mut n: i64 = 0;
    for d in digits.bytes() {
        let d = i64::from(d - b'0');
        n = n.saturating_mul(10);
        n = if negative {
            n.saturating_sub(d)
        } else {
            n.saturating_add(d)
        };
    }
    n
}

fn leading_float(text: &str) -> f64 {
    let (negative, rest) = split_sign(text);
    let sign = if negative { -1.0 } else { 1.0 };

    let lower = rest.get(..8).unwrap_or(rest).to_ascii_lowercase();
    if lower.starts_with("inf") {
        return sign * f64::INFINITY;
    }
    if lower.starts_with("nan") {
        return f64::NAN;
    }

    let b = rest.as_bytes();
    let int_len = digit_run(b);
    let mut end = int_len;
    let mut frac_len = 0;
    if b.get(end) == Some(&b'.') {
        frac_len = digit_run(&b[end + 1..]);
        if int_len > 0 || frac_len > 0 {
            end += 1 + frac_len;
        }
    }
    if int_len == 0 && frac_len == 0 {
        return 0.0;
    }

    // An exponent only counts when at least one digit follows it.
    if matches!(b.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(b.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_len = digit_run(&b[exp.min(b.len())..]);
        if exp_len > 0 {
            end = exp + exp_len;
        }
    }

    rest[..end].parse::<f64>().map(|v| sign * v).unwrap_or(0.0)
}

// ============================================================================
// OptionKey / Names
// ============================================================================

/// How an option is referred to once it has been declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OptionKey {
    Short(char),
    Long(String),
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKey::Short(c) => write!(f, "-{}", c),
            OptionKey::Long(name) => write!(f, "--{}", name),
        }
    }
}

impl From<char> for OptionKey {
    fn from(c: char) -> Self {
        OptionKey::Short(c)
    }
}

impl From<&str> for OptionKey {
    fn from(name: &str) -> Self {
        OptionKey::Long(name.to_string())
    }
}

impl From<String> for OptionKey {
    fn from(name: String) -> Self {
        OptionKey::Long(name)
    }
}

impl From<&OptionKey> for OptionKey {
    fn from(key: &OptionKey) -> Self {
        key.clone()
    }
}

/// The short letter and long name an option is declared with.
///
/// A NUL letter and an empty name both mean "no such form".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Names {
    pub short: Option<char>,
    pub long: Option<String>,
}

impl Names {
    pub fn new(long: Option<&str>, short: Option<char>) -> Self {
        Names {
            short: short.filter(|&c| c != '\0'),
            long: long.filter(|s| !s.is_empty()).map(str::to_string),
        }
    }
}

impl From<char> for Names {
    fn from(c: char) -> Self {
        Names::new(None, Some(c))
    }
}

impl From<&str> for Names {
    fn from(name: &str) -> Self {
        Names::new(Some(name), None)
    }
}

impl From<(&str, char)> for Names {
    fn from((name, c): (&str, char)) -> Self {
        Names::new(Some(name), Some(c))
    }
}

// ============================================================================
// Description
// ============================================================================

/// Help text for an option, with the meta word split off.
///
/// `"=FILE Input file"` becomes meta `FILE` and description `Input file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub text: String,
    pub meta: Option<String>,
}

impl Description {
    pub fn parse(s: &str) -> Self {
        let Some(rest) = s.strip_prefix('=') else {
            return Description {
                text: if s.is_empty() { NO_DESCRIPTION } else { s }.to_string(),
                meta: None,
            };
        };

        let meta_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let meta = &rest[..meta_end];
        let text = rest[meta_end..].trim_start();

        Description {
            text: if text.is_empty() { NO_DESCRIPTION } else { text }.to_string(),
            meta: (!meta.is_empty()).then(|| meta.to_string()),
        }
    }
}

// ============================================================================
// OptionDescriptor
// ============================================================================

#[derive(Debug, Clone)]
pub struct OptionDescriptor {
    pub(crate) names: Names,
    pub(crate) default: OptionValue,
    pub(crate) value: OptionValue,
    pub(crate) description: Description,
}

impl OptionDescriptor {
    pub(crate) fn new(names: Names, default: OptionValue, description: &str) -> Self {
        OptionDescriptor {
            names,
            value: default.clone(),
            default,
            description: Description::parse(description),
        }
    }

    pub fn kind(&self) -> OptionKind {
        self.value.kind()
    }

    pub fn short(&self) -> Option<char> {
        self.names.short
    }

    pub fn long(&self) -> Option<&str> {
        self.names.long.as_deref()
    }

    pub fn value(&self) -> &OptionValue {
        &self.value
    }

    pub fn default_value(&self) -> &OptionValue {
        &self.default
    }

    pub fn description(&self) -> &str {
        &self.description.text
    }

    pub fn meta(&self) -> Option<&str> {
        self.description.meta.as_deref()
    }

    /// The key this option is best named by in messages: long name first.
    pub fn key(&self) -> OptionKey {
        match (&self.names.long, self.names.short) {
            (Some(name), _) => OptionKey::Long(name.clone()),
            (None, Some(c)) => OptionKey::Short(c),
            (None, None) => OptionKey::Long(String::new()),
        }
    }
}
