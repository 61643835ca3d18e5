//! Process-fatal reporting for legacy embeddings.

use sl_value::EvalError;

/// Print a type-mismatch diagnostic and terminate the host process.
///
/// Used when `MismatchPolicy::Abort` is configured: the whole embedding
/// program stops, not just the current evaluation.
#[cold]
pub fn abort_on_mismatch(err: &EvalError) -> ! {
    tracing::error!(error = %err, "fatal type mismatch, terminating");
    eprintln!("{}", err.render());
    std::process::exit(1)
}
