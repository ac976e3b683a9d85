/// Process exit codes (spec.md §6): `0` clean shutdown, `1` fatal config
/// error or divergence, `2` dependency unreachable at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Clean = 0,
    FatalError = 1,
    DependencyUnreachable = 2,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}
