//! Persisted player progress
//!
//! Currency, unlocked skins, high score, mission state, upgrade levels and
//! the music preference. Saved fire-and-forget on every change (last write
//! wins); corrupt or missing fields default defensively on load.

use serde::{Deserialize, Serialize};

use crate::missions::{MissionKind, Missions};
use crate::skins::{self, DEFAULT_SKIN_ID, Skin};
use crate::upgrades::{UpgradeId, Upgrades};

/// Everything that outlives a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub currency: u64,
    #[serde(default = "Profile::default_unlocked_skins")]
    pub unlocked_skins: Vec<String>,
    #[serde(default = "Profile::default_skin_id")]
    pub selected_skin: String,
    #[serde(default)]
    pub high_score: u64,
    #[serde(default)]
    pub missions: Missions,
    #[serde(default)]
    pub upgrades: Upgrades,
    #[serde(default = "Profile::default_music_enabled")]
    pub music_enabled: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            currency: 0,
            unlocked_skins: Self::default_unlocked_skins(),
            selected_skin: Self::default_skin_id(),
            high_score: 0,
            missions: Missions::default(),
            upgrades: Upgrades::default(),
            music_enabled: true,
        }
    }
}

impl Profile {
    fn default_unlocked_skins() -> Vec<String> {
        vec![DEFAULT_SKIN_ID.to_string()]
    }

    fn default_skin_id() -> String {
        DEFAULT_SKIN_ID.to_string()
    }

    fn default_music_enabled() -> bool {
        true
    }

    /// Repair invariants after load: unknown skins are dropped, the default
    /// skin is always owned, and the selection falls back to the default
    /// when it is not owned
    pub fn sanitize(&mut self) {
        self.unlocked_skins.retain(|id| skins::find(id).is_some());
        if !self.unlocked_skins.iter().any(|id| id == DEFAULT_SKIN_ID) {
            self.unlocked_skins.insert(0, DEFAULT_SKIN_ID.to_string());
        }
        self.unlocked_skins.dedup();
        if !self.is_skin_unlocked(&self.selected_skin) {
            self.selected_skin = DEFAULT_SKIN_ID.to_string();
        }
        self.missions.sanitize();
    }

    pub fn is_skin_unlocked(&self, id: &str) -> bool {
        self.unlocked_skins.iter().any(|s| s == id)
    }

    /// The currently selected skin's catalog entry
    pub fn current_skin(&self) -> &'static Skin {
        skins::find(&self.selected_skin)
            .or_else(|| skins::find(DEFAULT_SKIN_ID))
            .unwrap_or(&skins::CATALOG[0])
    }

    /// Select an already-owned skin. Unknown or locked ids are ignored.
    pub fn select_skin(&mut self, id: &str) -> bool {
        if skins::find(id).is_none() || !self.is_skin_unlocked(id) {
            return false;
        }
        self.selected_skin = id.to_string();
        true
    }

    /// Buy and select a skin. Refused (no state change) when the id is
    /// unknown, already owned, or unaffordable.
    pub fn purchase_skin(&mut self, id: &str) -> bool {
        let Some(skin) = skins::find(id) else {
            return false;
        };
        if self.is_skin_unlocked(id) || self.currency < skin.price {
            return false;
        }
        self.currency -= skin.price;
        self.unlocked_skins.push(id.to_string());
        self.selected_skin = id.to_string();
        log::info!("Purchased skin {} for {}", id, skin.price);
        true
    }

    /// Buy an upgrade against the current balance
    pub fn purchase_upgrade(&mut self, id: UpgradeId) -> bool {
        self.upgrades.purchase(id, &mut self.currency)
    }

    /// Flip the music preference; returns the new value
    pub fn toggle_music(&mut self) -> bool {
        self.music_enabled = !self.music_enabled;
        self.music_enabled
    }

    /// Claim a completed mission tier; returns the reward paid
    pub fn claim_mission(&mut self, kind: MissionKind) -> Option<u64> {
        let reward = self.missions.claim(kind, &mut self.currency);
        if let Some(reward) = reward {
            log::info!("Claimed {:?} tier for {}", kind, reward);
        }
        reward
    }

    /// Storage key (LocalStorage) / file name (native)
    const STORAGE_KEY: &'static str = "dash_runner_profile";

    /// Load the profile from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(mut profile) = serde_json::from_str::<Profile>(&json) {
                    profile.sanitize();
                    log::info!("Loaded profile ({} currency)", profile.currency);
                    return profile;
                }
                log::warn!("Corrupt profile, starting fresh");
            }
        }

        log::info!("No saved profile, using defaults");
        Self::default()
    }

    /// Save the profile to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Profile saved");
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn storage_path() -> std::path::PathBuf {
        std::path::PathBuf::from(format!("{}.json", Self::STORAGE_KEY))
    }

    /// Load the profile from a JSON file next to the binary (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::fs::read_to_string(Self::storage_path()) {
            Ok(json) => match serde_json::from_str::<Profile>(&json) {
                Ok(mut profile) => {
                    profile.sanitize();
                    log::info!("Loaded profile ({} currency)", profile.currency);
                    return profile;
                }
                Err(err) => log::warn!("Corrupt profile, using defaults: {err}"),
            },
            Err(_) => log::info!("No saved profile, using defaults"),
        }
        Self::default()
    }

    /// Save the profile to a JSON file (native); failures are logged and
    /// swallowed, the in-memory state stays authoritative
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = std::fs::write(Self::storage_path(), json) {
                    log::warn!("Failed to save profile: {err}");
                } else {
                    log::info!("Profile saved");
                }
            }
            Err(err) => log::warn!("Failed to serialize profile: {err}"),
        }
    }
}
