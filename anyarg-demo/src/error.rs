use std::io;

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error(transparent)]
    Options(#[from] anyarg::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, DemoError>;

/// Print a message for the user and exit with status 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("{}", msg);
    std::process::exit(1);
}
