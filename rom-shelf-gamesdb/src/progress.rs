//! Import progress reporting.

/// Trait for receiving import progress updates.
///
/// `import_dump` takes an optional reporter; the CLI drives a progress
/// bar through it, and passing `None` keeps the import silent.
pub trait ImportProgress {
    /// Called after each game record is processed.
    fn on_game(&self, current: usize, total: usize);

    /// Called when a phase starts (e.g., "Importing platforms").
    fn on_phase(&self, message: &str);
}
