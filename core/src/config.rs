/// What `call` and `ret` do when the call stack is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackPolicy {
    /// Fail the cycle with `StackOverflow`/`StackUnderflow`.
    Checked,
    /// The stack pointer wraps around the 16 slots, overwriting the oldest frames.
    Wrapping,
}

/// # Config
/// Behavior switches for an `Engine`.
///
/// - `stack_policy` how call stack exhaustion is handled
/// - `debug_console` whether the extended print opcodes do anything
/// - `trace` whether every executed instruction is logged at trace level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub stack_policy: StackPolicy,
    pub debug_console: bool,
    pub trace: bool,
}

impl Config {
    pub fn new() -> Self {
        Config {
            stack_policy: StackPolicy::Checked,
            debug_console: false,
            trace: false,
        }
    }

    pub fn with_stack_policy(self, stack_policy: StackPolicy) -> Self {
        Config {
            stack_policy,
            ..self
        }
    }

    pub fn with_debug_console(self, debug_console: bool) -> Self {
        Config {
            debug_console,
            ..self
        }
    }

    pub fn with_trace(self, trace: bool) -> Self {
        Config { trace, ..self }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
