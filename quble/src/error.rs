/// The one failure class the loading protocol can signal.
///
/// There is deliberately no more detail here: not every call site has a
/// console or memory to carry richer diagnostics, so the contract stays a
/// flat success/failure indicator. Whether to retry is the caller's call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadError {
    Disk,
}

pub type Result<T> = core::result::Result<T, LoadError>;
