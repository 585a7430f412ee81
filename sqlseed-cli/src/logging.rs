//! Logger setup for the CLI.
//!
//! All user-facing output goes through the `log` macros, so `--quiet` and
//! `--logfile` apply to everything a command prints.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

use crate::error::CliError;

/// Writes log output to the console and, optionally, to a file with ANSI
/// escape codes stripped.
pub(crate) struct TeeWriter<W: Write> {
    console: W,
    file: Option<File>,
}

impl<W: Write> TeeWriter<W> {
    pub(crate) fn new(console: W, file: Option<File>) -> Self {
        Self { console, file }
    }
}

impl<W: Write> Write for TeeWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.console.write_all(buf)?;
        if let Some(file) = &mut self.file {
            file.write_all(&strip_ansi_escapes::strip(buf))?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.console.flush()?;
        if let Some(file) = &mut self.file {
            file.flush()?;
        }
        Ok(())
    }
}

pub(crate) fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger. `RUST_LOG`, when set, overrides the level the
/// flags chose.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let file = match logfile {
        Some(path) => Some(File::create(path).map_err(|e| {
            CliError::config(format!("cannot create log file {}: {}", path.display(), e))
        })?),
        None => None,
    };

    let mut builder = Builder::new();
    builder
        .filter_level(level_for(quiet, verbose))
        .parse_env(Env::default())
        .target(Target::Pipe(Box::new(TeeWriter::new(io::stdout(), file))));

    if verbose {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                buf.timestamp_millis(),
                record.level(),
                record.args()
            )
        });
    } else {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }

    builder
        .try_init()
        .map_err(|e| CliError::config(format!("logger already initialised: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_pick_the_level() {
        assert_eq!(level_for(false, false), LevelFilter::Info);
        assert_eq!(level_for(false, true), LevelFilter::Debug);
        assert_eq!(level_for(true, true), LevelFilter::Warn);
    }

    #[test]
    fn logfile_copy_has_no_escape_codes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        let mut tee = TeeWriter::new(Vec::new(), Some(File::create(&path).unwrap()));

        tee.write_all(b"\x1b[31mfailed\x1b[0m\n").unwrap();
        tee.flush().unwrap();

        assert_eq!(tee.console, b"\x1b[31mfailed\x1b[0m\n");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "failed\n");
    }
}
