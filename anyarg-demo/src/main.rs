mod arguments;
mod error;

use std::io::{self, Write};

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::arguments::{parse_arguments, usage, Cmdline};
use crate::error::{fatal, Result};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn report<W: Write>(out: &mut W, cmd: &Cmdline) -> io::Result<()> {
    if cmd.all {
        writeln!(out, "option --all is set in the command line")?;
    }
    if cmd.verbose {
        writeln!(out, "verbose mode is opened")?;
    }
    writeln!(out, "The value of option -i is {}", cmd.input_file)?;
    writeln!(out, "The value of option -b is {}", cmd.buffer_size)?;
    writeln!(out, "The value of option --min is {:.6}", cmd.min)?;
    for (i, arg) in cmd.args.iter().enumerate() {
        writeln!(out, "argument {}: {}", i, arg)?;
    }
    Ok(())
}

fn run() -> Result<()> {
    let (cmd, opt) = parse_arguments(std::env::args())?;
    debug!(?cmd, "command line");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cmd.help {
        write!(out, "{}", usage(&opt))?;
        return Ok(());
    }
    if cmd.dump {
        write!(out, "{}", opt.dump())?;
        return Ok(());
    }
    report(&mut out, &cmd)?;
    Ok(())
}

fn main() {
    init_logging();
    if let Err(e) = run() {
        fatal(&format!("anyarg-demo: {}", e));
    }
}
