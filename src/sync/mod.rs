/// Quiet-period gate for hand edits.
pub mod debounce;
/// Merging parsed scenes into the live model.
pub mod reconcile;
