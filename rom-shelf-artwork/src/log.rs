//! Per-item outcomes for an artwork run.

use std::path::Path;

use crate::download::JobOutcome;

/// What happened to one ROM file from the core tree.
#[derive(Debug, Clone)]
pub enum RomEntry {
    /// The game matched and its jobs ran (each with its own outcome).
    Matched {
        file: String,
        game_title: String,
        jobs: Vec<JobOutcome>,
    },
    /// The game matched but the store holds no artwork rows for it.
    NoArtwork { file: String, game_title: String },
    /// No store record matched the normalized name.
    Unmatched { file: String },
}

/// Collects per-ROM outcomes and produces the end-of-run report.
#[derive(Debug, Default)]
pub struct RunLog {
    entries: Vec<RomEntry>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub downloaded: usize,
    pub skipped_existing: usize,
    pub failed: usize,
    pub no_artwork: usize,
    pub unmatched: usize,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: RomEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[RomEntry] {
        &self.entries
    }

    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary::default();
        for entry in &self.entries {
            match entry {
                RomEntry::Matched { jobs, .. } => {
                    for job in jobs {
                        match job {
                            JobOutcome::Downloaded(_) => summary.downloaded += 1,
                            JobOutcome::SkippedExisting(_) => summary.skipped_existing += 1,
                            JobOutcome::Failed { .. } => summary.failed += 1,
                        }
                    }
                }
                RomEntry::NoArtwork { .. } => summary.no_artwork += 1,
                RomEntry::Unmatched { .. } => summary.unmatched += 1,
            }
        }
        summary
    }

    /// Write the full report to a file.
    pub fn write_to_file(&self, path: &Path) -> std::io::Result<()> {
        use std::io::Write;

        let mut file = std::fs::File::create(path)?;
        let summary = self.summary();

        writeln!(file, "=== Artwork Run ===")?;
        writeln!(
            file,
            "Date: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(file)?;
        writeln!(file, "Downloaded: {}", summary.downloaded)?;
        writeln!(file, "Already present: {}", summary.skipped_existing)?;
        writeln!(file, "Failed: {}", summary.failed)?;
        writeln!(file, "No artwork: {}", summary.no_artwork)?;
        writeln!(file, "Unmatched: {}", summary.unmatched)?;
        writeln!(file)?;

        for entry in &self.entries {
            match entry {
                RomEntry::Matched {
                    file: f,
                    game_title,
                    jobs,
                } => {
                    writeln!(file, "[OK] {f} -> \"{game_title}\"")?;
                    for job in jobs {
                        match job {
                            JobOutcome::Downloaded(p) => {
                                writeln!(file, "     Downloaded: {}", p.display())?
                            }
                            JobOutcome::SkippedExisting(p) => {
                                writeln!(file, "     Exists: {}", p.display())?
                            }
                            JobOutcome::Failed { dest, message } => {
                                writeln!(file, "     Failed: {} ({message})", dest.display())?
                            }
                        }
                    }
                }
                RomEntry::NoArtwork { file: f, game_title } => {
                    writeln!(file, "[NO ARTWORK] {f} -> \"{game_title}\"")?;
                }
                RomEntry::Unmatched { file: f } => {
                    writeln!(file, "[UNMATCHED] {f}")?;
                }
            }
        }

        Ok(())
    }
}
