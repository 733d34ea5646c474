//! Profile repository for JSON storage
//!
//! Manages loading and saving the budget profile to profile.json. An absent
//! file means no profile has been set up yet.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{GuardError, GuardResult};
use crate::models::Profile;

use super::file_io::{read_json, write_json_atomic};
use super::records::ProfileRecord;

/// Repository for the single budget profile
pub struct ProfileRepository {
    path: PathBuf,
    data: RwLock<Option<Profile>>,
}

impl ProfileRepository {
    /// Create a new profile repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(None),
        }
    }

    /// Load the profile from disk
    pub fn load(&self) -> GuardResult<()> {
        let record: Option<ProfileRecord> = read_json(&self.path)?;
        let profile = record.map(ProfileRecord::into_profile).transpose()?;

        let mut data = self.data.write().map_err(|e| {
            GuardError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = profile;
        Ok(())
    }

    /// Save the profile to disk (no-op when none is set)
    pub fn save(&self) -> GuardResult<()> {
        let data = self.data.read().map_err(|e| {
            GuardError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        match data.as_ref() {
            Some(profile) => write_json_atomic(&self.path, &ProfileRecord::from(profile)),
            None => Ok(()),
        }
    }

    /// Get the profile, if one has been set up
    pub fn get(&self) -> GuardResult<Option<Profile>> {
        let data = self.data.read().map_err(|e| {
            GuardError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(*data)
    }

    /// Replace the profile after validating it
    pub fn set(&self, profile: Profile) -> GuardResult<()> {
        profile
            .validate()
            .map_err(|e| GuardError::Validation(e.to_string()))?;

        let mut data = self.data.write().map_err(|e| {
            GuardError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = Some(profile);
        Ok(())
    }
}
