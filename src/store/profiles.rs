// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::models::{Profile, ProfileSnapshot, default_categories};
use crate::store::error::StoreError;
use crate::store::kv::{KvStore, read_json, write_json};
use crate::store::ledger::Ledger;

pub const KEY_PROFILES: &str = "profiles";
pub const KEY_CURRENT_PROFILE: &str = "currentProfileId";

fn snapshot_key(profile_id: &str) -> String {
    format!("profile_{profile_id}")
}

static SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new("[^a-z0-9]+").unwrap());

/// Export file name component: lowercased, non-alphanumeric runs collapsed.
pub fn slugify(name: &str) -> String {
    let lower = name.to_lowercase();
    SLUG_RE.replace_all(&lower, "-").trim_matches('-').to_string()
}

/// The set of known profiles and the pointer to the current one. Mediates
/// moving the ledger's contents between profiles: the outgoing profile's data
/// is always flushed to its snapshot before the incoming snapshot is loaded.
pub struct Profiles {
    profiles: Vec<Profile>,
    current: Profile,
}

impl Profiles {
    /// Load the profile list and current pointer. When nothing is stored yet a
    /// default profile is synthesized; a dangling current pointer falls back
    /// to the first profile in the list.
    pub fn load(kv: &KvStore) -> Profiles {
        let mut profiles =
            read_json::<Vec<Profile>>(kv, KEY_PROFILES).unwrap_or_default();
        if profiles.is_empty() {
            profiles.push(Profile::default_profile());
        }
        let current = match kv.get(KEY_CURRENT_PROFILE) {
            Ok(Some(id)) => profiles
                .iter()
                .find(|p| p.id == id)
                .unwrap_or(&profiles[0])
                .clone(),
            Ok(None) => profiles[0].clone(),
            Err(e) => {
                warn!("Error reading current profile id: {}", e);
                profiles[0].clone()
            }
        };
        let store = Profiles { profiles, current };
        store.persist_index(kv);
        store
    }

    pub fn list(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn current(&self) -> &Profile {
        &self.current
    }

    /// Flush the current profile, then start a fresh one with an empty
    /// transaction list and the default category set.
    pub fn create_profile(&mut self, kv: &KvStore, ledger: &mut Ledger, name: &str) -> Profile {
        self.flush_current(kv, ledger);

        let profile = Profile::new(name);
        self.profiles.push(profile.clone());
        self.current = profile.clone();

        ledger.replace(kv, Vec::new(), default_categories());
        self.persist_index(kv);
        profile
    }

    /// Switch the ledger to another profile. Switching to the current profile
    /// or to an unknown id is a no-op.
    pub fn switch_profile(&mut self, kv: &KvStore, ledger: &mut Ledger, id: &str) {
        if id == self.current.id {
            return;
        }
        let Some(target) = self.profiles.iter().find(|p| p.id == id).cloned() else {
            return;
        };

        self.flush_current(kv, ledger);
        self.current = target;
        self.load_profile_data(kv, ledger, id);
        self.persist_index(kv);
    }

    /// Remove a profile and its snapshot. The last remaining profile cannot be
    /// deleted; deleting the current profile switches to another one first.
    pub fn delete_profile(
        &mut self,
        kv: &KvStore,
        ledger: &mut Ledger,
        id: &str,
    ) -> Result<(), StoreError> {
        if !self.profiles.iter().any(|p| p.id == id) {
            return Err(StoreError::ProfileNotFound(id.to_string()));
        }
        if self.profiles.len() <= 1 {
            return Err(StoreError::LastProfile);
        }

        if id == self.current.id {
            let other = self
                .profiles
                .iter()
                .find(|p| p.id != id)
                .map(|p| p.id.clone());
            if let Some(other_id) = other {
                self.switch_profile(kv, ledger, &other_id);
            }
        }

        self.profiles.retain(|p| p.id != id);
        if let Err(e) = kv.remove(&snapshot_key(id)) {
            warn!("Error removing snapshot for profile '{}': {}", id, e);
        }
        self.persist_index(kv);
        Ok(())
    }

    /// Flush the current profile and write its snapshot as a portable JSON
    /// file named after the profile. Returns the path written.
    pub fn export_profile(
        &self,
        kv: &KvStore,
        ledger: &Ledger,
        dir: &Path,
    ) -> Result<PathBuf, StoreError> {
        self.flush_current(kv, ledger);

        let snapshot = self.current_snapshot(ledger);
        let text = serde_json::to_string_pretty(&snapshot)?;
        let path = dir.join(format!("money-savior-{}.json", slugify(&self.current.name)));
        fs::write(&path, text)?;
        Ok(path)
    }

    /// Load a snapshot file as a profile. A snapshot whose profile id already
    /// exists overwrites that entry in place; a new id is appended. Either way
    /// the imported profile becomes current and its data fills the ledger.
    pub fn import_profile(
        &mut self,
        kv: &KvStore,
        ledger: &mut Ledger,
        path: &Path,
    ) -> Result<Profile, StoreError> {
        let text = fs::read_to_string(path)?;
        let snapshot: ProfileSnapshot = serde_json::from_str(&text)
            .map_err(|e| StoreError::InvalidSnapshot(e.to_string()))?;

        self.flush_current(kv, ledger);

        match self
            .profiles
            .iter_mut()
            .find(|p| p.id == snapshot.profile.id)
        {
            Some(existing) => *existing = snapshot.profile.clone(),
            None => self.profiles.push(snapshot.profile.clone()),
        }
        self.current = snapshot.profile.clone();

        ledger.replace(kv, snapshot.transactions, snapshot.categories);
        self.flush_current(kv, ledger);
        self.persist_index(kv);
        Ok(snapshot.profile)
    }

    fn current_snapshot(&self, ledger: &Ledger) -> ProfileSnapshot {
        ProfileSnapshot {
            profile: self.current.clone(),
            transactions: ledger.transactions().to_vec(),
            categories: ledger.categories().to_vec(),
        }
    }

    /// Serialize the ledger under the current profile's snapshot key.
    fn flush_current(&self, kv: &KvStore, ledger: &Ledger) {
        let snapshot = self.current_snapshot(ledger);
        write_json(kv, &snapshot_key(&self.current.id), &snapshot);
    }

    /// Fill the ledger from a profile's snapshot; a missing or corrupt
    /// snapshot yields an empty ledger with default categories.
    fn load_profile_data(&self, kv: &KvStore, ledger: &mut Ledger, id: &str) {
        match read_json::<ProfileSnapshot>(kv, &snapshot_key(id)) {
            Some(snapshot) => ledger.replace(kv, snapshot.transactions, snapshot.categories),
            None => ledger.replace(kv, Vec::new(), default_categories()),
        }
    }

    fn persist_index(&self, kv: &KvStore) {
        write_json(kv, KEY_PROFILES, &self.profiles);
        // The current-profile pointer is a bare id string, not JSON.
        if let Err(e) = kv.set(KEY_CURRENT_PROFILE, &self.current.id) {
            warn!("Error saving current profile id: {}", e);
        }
    }
}
