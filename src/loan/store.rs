//! JSON file store for the loan collection

use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use super::Loan;
use crate::error::PersistenceError;

/// Reads and writes the loan list as a JSON array
#[derive(Debug, Clone)]
pub struct LoanStore {
    path: PathBuf,
}

impl LoanStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load all loans; a missing or blank file is an empty collection
    pub fn load(&self) -> Result<Vec<Loan>, PersistenceError> {
        if !self.exists() {
            debug!("no loan file at {}", self.path.display());
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(&self.path).map_err(|source| PersistenceError::Read {
            path: self.path.clone(),
            source,
        })?;
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }

        let loans: Vec<Loan> =
            serde_json::from_str(&json).map_err(|source| PersistenceError::Parse {
                path: self.path.clone(),
                source,
            })?;
        debug!("loaded {} loans from {}", loans.len(), self.path.display());
        Ok(loans)
    }

    /// Replace the stored collection, creating parent directories as needed
    pub fn save(&self, loans: &[Loan]) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(loans).map_err(PersistenceError::Serialize)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PersistenceError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, json).map_err(|source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        })?;

        info!("saved {} loans to {}", loans.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LoanStore::new(dir.path().join("loans.json"));
        assert!(!store.exists());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_blank_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loans.json");
        fs::write(&path, "  \n").unwrap();
        assert!(LoanStore::new(path).load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = LoanStore::new(dir.path().join("nested").join("loans.json"));
        let loans = vec![
            Loan::new("Car", dec!(12000), dec!(6.5), dec!(400), 15).unwrap(),
            Loan::new("Card", dec!(2500.75), dec!(19.99), dec!(100), 3).unwrap(),
        ];

        store.save(&loans).unwrap();
        assert!(store.exists());
        assert_eq!(store.load().unwrap(), loans);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loans.json");
        fs::write(&path, "{ not json").unwrap();

        let err = LoanStore::new(&path).load().unwrap_err();
        assert!(matches!(err, PersistenceError::Parse { .. }));
        assert!(err.to_string().contains("loans.json"));
    }
}
