//! Identity directory
//!
//! Mocked admin-side lookup over seeded identity records, with CSV export of
//! lookup results. The seed rows are the demo's fixed population; nothing is
//! persisted.

use crate::models::{IdentityRecord, IdentityStatus};
use std::io;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;

/// Columns written by [`IdentityDirectory::export_csv`].
pub const CSV_HEADERS: &[&str] = &["id", "name", "walletAddress", "hashedProof", "status"];

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Searchable registry of known identities.
pub struct IdentityDirectory {
    records: Vec<IdentityRecord>,
    search_delay: Duration,
}

impl IdentityDirectory {
    /// Directory seeded with the demo population.
    pub fn new() -> Self {
        Self::with_search_delay(Duration::ZERO)
    }

    /// `search_delay` stands in for the backend round trip; the demo takes
    /// it from configuration.
    pub fn with_search_delay(search_delay: Duration) -> Self {
        Self::with_records(seed_records(), search_delay)
    }

    pub fn with_records(records: Vec<IdentityRecord>, search_delay: Duration) -> Self {
        IdentityDirectory {
            records,
            search_delay,
        }
    }

    pub fn records(&self) -> &[IdentityRecord] {
        &self.records
    }

    /// Case-insensitive substring search over name and wallet address.
    ///
    /// An empty or whitespace-only term lists the whole directory.
    pub async fn search(&self, term: &str) -> Vec<IdentityRecord> {
        if !self.search_delay.is_zero() {
            sleep(self.search_delay).await;
        }

        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.records.clone();
        }

        let hits: Vec<IdentityRecord> = self
            .records
            .iter()
            .filter(|record| {
                record.name.to_lowercase().contains(&needle)
                    || record.wallet_address.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        log::debug!("Directory search '{}' matched {} record(s)", term, hits.len());
        hits
    }

    /// Write a header row plus one row per record.
    pub fn export_csv<W: io::Write>(
        &self,
        records: &[IdentityRecord],
        writer: W,
    ) -> Result<(), DirectoryError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(CSV_HEADERS)?;

        for record in records {
            let id = record.id.to_string();
            let status = record.status.to_string();
            wtr.write_record([
                id.as_str(),
                record.name.as_str(),
                record.wallet_address.as_str(),
                record.hashed_proof.as_str(),
                status.as_str(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }
}

impl Default for IdentityDirectory {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_records() -> Vec<IdentityRecord> {
    vec![
        IdentityRecord::new(
            "Alice Johnson",
            "rP9jPyP5qfV9gD9iW3t9aZ1xYcZ2bV...",
            "a1b2c3d4...",
            IdentityStatus::Verified,
        ),
        IdentityRecord::new(
            "Bob Williams",
            "rN7bA1k2yV3zC4d5fG6hJ7k8L9m0...",
            "b2c3d4e5...",
            IdentityStatus::InReview,
        ),
        IdentityRecord::new(
            "Charlie Brown",
            "rG8fE9d0C1b2A3k4H5j6L7m8N9p...",
            "c3d4e5f6...",
            IdentityStatus::Flagged,
        ),
    ]
}
