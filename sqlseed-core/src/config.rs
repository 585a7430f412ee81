//! Run configuration, passed explicitly to the run loop and executor.

/// How much the run loop echoes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Only failures.
    Quiet,
    #[default]
    Normal,
    /// Also echo every statement before it is sent.
    Verbose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub verbosity: Verbosity,
    pub color_enabled: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Normal,
            color_enabled: true,
        }
    }
}

impl RunConfig {
    pub fn new(verbosity: Verbosity, color_enabled: bool) -> Self {
        Self {
            verbosity,
            color_enabled,
        }
    }

    /// Plain output, used by tests and non-interactive callers.
    pub fn quiet() -> Self {
        Self::new(Verbosity::Quiet, false)
    }

    pub fn echo_statements(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }
}
