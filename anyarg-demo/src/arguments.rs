use anyarg::Context;

use crate::error::Result;

pub const USAGE_INTRO: &str = "Usage: anyarg-demo [OPTION]... [ARG]...
Show how the command line was understood.

";

#[derive(Debug, Clone, PartialEq)]
pub struct Cmdline {
    pub all: bool,
    pub input_file: String,
    pub buffer_size: i64,
    pub min: f64,
    pub verbose: bool,
    pub help: bool,
    pub dump: bool,
    pub args: Vec<String>,
}

pub fn build_options() -> Result<Context> {
    let mut opt = Context::new();
    opt.add_flag(("all", 'a'), "List all stuffs.")?;
    opt.add_str_option(
        ("input-file", 'i'),
        "-",
        "=FILE Input filename, default is -.",
    )?;
    opt.add_int_option(
        ("buffer-size", 'b'),
        100,
        "=SIZE Set the buffer size, default is 100.",
    )?;
    opt.add_float_option(
        "min",
        0.9,
        "=FLOAT Minimal correlation coefficient, default is 0.9.",
    )?;
    opt.add_flag('v', "Open verbose mode.")?;
    opt.add_flag("dump", "Print every option with its value.")?;
    opt.add_flag(("help", 'h'), "Display help information.")?;
    Ok(opt)
}

impl Cmdline {
    pub fn from_context(opt: &Context) -> Result<Cmdline> {
        Ok(Cmdline {
            all: opt.flag("all")?,
            input_file: opt.string("input-file")?.to_string(),
            buffer_size: opt.int("buffer-size")?,
            min: opt.float("min")?,
            verbose: opt.flag('v')?,
            help: opt.flag("help")?,
            dump: opt.flag("dump")?,
            args: opt.positionals().to_vec(),
        })
    }
}

/// Declare the options, parse `argv` and collect the results.
///
/// The context is returned as well so callers can render help or a dump.
pub fn parse_arguments<I>(argv: I) -> Result<(Cmdline, Context)>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut opt = build_options()?;
    opt.parse(argv)?;
    let cmdline = Cmdline::from_context(&opt)?;
    Ok((cmdline, opt))
}

pub fn usage(opt: &Context) -> String {
    format!("{}{}", USAGE_INTRO, opt.usage())
}
