//! Command-line option declaration and parsing.
//!
//! Declare flags and string, integer or floating-point options, each with a
//! single-letter short form, a long name, or both; then parse argv once and
//! read typed values back:
//! - POSIX short options: `-a`, bundled flags `-alv`, `-o foo`, `-ofoo`
//! - GNU long options: `--all`, `--output=foo`, `--output foo`
//! - `--` ends option parsing; a lone `-` is an ordinary argument
//!
//! ```
//! use anyarg::Context;
//!
//! let mut opt = Context::new();
//! opt.add_flag(("all", 'a'), "List all.").unwrap();
//! opt.add_int_option(("buffer-size", 'b'), 100, "=SIZE Set the buffer size.").unwrap();
//! opt.parse(["prog", "-a", "--buffer-size=4096", "in.txt"]).unwrap();
//!
//! assert!(opt.flag('a').unwrap());
//! assert_eq!(opt.int("buffer-size").unwrap(), 4096);
//! assert_eq!(opt.positional(0).unwrap(), "in.txt");
//! ```

mod error;
mod option;
mod parser;
mod registry;
mod usage;

pub use error::{Error, ErrorKind, Result};
pub use option::{Description, Names, OptionDescriptor, OptionKey, OptionKind, OptionValue};
pub use parser::{tokenize, Resolution};
pub use registry::{OptionId, OptionRegistry};
pub use usage::UsageStyle;

/// Declared options plus the outcome of the last parse.
#[derive(Debug, Clone, Default)]
pub struct Context {
    registry: OptionRegistry,
    program: Option<String>,
    positionals: Vec<String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Declare an option whose kind is the variant of `default`.
    ///
    /// A description starting with `=WORD` uses `WORD` as the meta word in
    /// the help text, e.g. `"=FILE Output file"`.
    pub fn register(
        &mut self,
        names: impl Into<Names>,
        default: impl Into<OptionValue>,
        description: &str,
    ) -> Result<OptionId> {
        self.registry
            .register(names.into(), default.into(), description)
    }

    /// A boolean flag, false until it appears on the command line.
    pub fn add_flag(&mut self, names: impl Into<Names>, description: &str) -> Result<OptionId> {
        self.register(names, false, description)
    }

    pub fn add_str_option(
        &mut self,
        names: impl Into<Names>,
        default: &str,
        description: &str,
    ) -> Result<OptionId> {
        self.register(names, default, description)
    }

    pub fn add_int_option(
        &mut self,
        names: impl Into<Names>,
        default: i64,
        description: &str,
    ) -> Result<OptionId> {
        self.register(names, default, description)
    }

    pub fn add_float_option(
        &mut self,
        names: impl Into<Names>,
        default: f64,
        description: &str,
    ) -> Result<OptionId> {
        self.register(names, default, description)
    }

    // ------------------------------------------------------------------
    // Parsing
    // ------------------------------------------------------------------

    /// Parse a full argument vector; the first item is the program name.
    ///
    /// Every option starts again from its default and the positional list
    /// is replaced. On error nothing changes.
    pub fn parse<I>(&mut self, argv: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let argv: Vec<I::Item> = argv.into_iter().collect();
        let resolution = tokenize(&self.registry, &argv[..])?;

        self.registry.restore_defaults();
        for (id, value) in resolution.assignments {
            self.registry.set(id, value);
        }
        self.program = Some(resolution.program);
        self.positionals = resolution.positionals;
        Ok(())
    }

    /// Parse the arguments this process was started with.
    pub fn parse_env(&mut self) -> Result<()> {
        self.parse(std::env::args())
    }

    /// Forget the last parse: defaults back, no positionals.
    pub fn reset(&mut self) {
        self.registry.restore_defaults();
        self.program = None;
        self.positionals.clear();
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    fn descriptor(&self, key: OptionKey) -> Result<(&OptionDescriptor, OptionKey)> {
        match self.registry.lookup(&key) {
            Some(id) => Ok((self.registry.get(id), key)),
            None => Err(Error::Undefined(key)),
        }
    }

    fn mismatch(key: OptionKey, expected: OptionKind, opt: &OptionDescriptor) -> Error {
        Error::KindMismatch {
            key,
            expected,
            actual: opt.kind(),
        }
    }

    /// Current value of any option, whatever its kind.
    pub fn value(&self, key: impl Into<OptionKey>) -> Result<&OptionValue> {
        let (opt, _) = self.descriptor(key.into())?;
        Ok(opt.value())
    }

    pub fn flag(&self, key: impl Into<OptionKey>) -> Result<bool> {
        let (opt, key) = self.descriptor(key.into())?;
        match opt.value() {
            OptionValue::Flag(b) => Ok(*b),
            _ => Err(Self::mismatch(key, OptionKind::Flag, opt)),
        }
    }

    pub fn string(&self, key: impl Into<OptionKey>) -> Result<&str> {
        let (opt, key) = self.descriptor(key.into())?;
        match opt.value() {
            OptionValue::Str(s) => Ok(s),
            _ => Err(Self::mismatch(key, OptionKind::Str, opt)),
        }
    }

    pub fn int(&self, key: impl Into<OptionKey>) -> Result<i64> {
        let (opt, key) = self.descriptor(key.into())?;
        match opt.value() {
            OptionValue::Int(n) => Ok(*n),
            _ => Err(Self::mismatch(key, OptionKind::Int, opt)),
        }
    }

    pub fn float(&self, key: impl Into<OptionKey>) -> Result<f64> {
        let (opt, key) = self.descriptor(key.into())?;
        match opt.value() {
            OptionValue::Float(n) => Ok(*n),
            _ => Err(Self::mismatch(key, OptionKind::Float, opt)),
        }
    }

    pub fn positional_count(&self) -> usize {
        self.positionals.len()
    }

    pub fn positional(&self, index: usize) -> Result<&str> {
        self.positionals
            .get(index)
            .map(String::as_str)
            .ok_or(Error::OutOfRange {
                index,
                count: self.positionals.len(),
            })
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    /// `argv[0]` of the last successful parse.
    pub fn program_name(&self) -> Option<&str> {
        self.program.as_deref()
    }

    pub fn registry(&self) -> &OptionRegistry {
        &self.registry
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    pub fn usage(&self) -> String {
        self.usage_with(&UsageStyle::default())
    }

    pub fn usage_with(&self, style: &UsageStyle) -> String {
        usage::render(self.registry.iter(), style)
    }

    /// Every option with its current value, then the positionals.
    pub fn dump(&self) -> String {
        usage::dump(self.registry.iter(), &self.positionals)
    }
}
