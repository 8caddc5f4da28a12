//! The account slot: the one mutable display profile of the signed-in user.
//!
//! # Design
//! `AccountSlot` is an ordinary owned value; whoever needs it borrows it.
//! Change notification goes through a `tokio::sync::watch` channel, so a
//! subscriber always sees the latest profile without polling and a burst of
//! updates collapses into one wake-up.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub name: String,
    pub email: String,
    pub avatar: String,
}

impl Default for AccountProfile {
    fn default() -> Self {
        Self {
            name: "Ling".to_string(),
            email: "linghypshen@gmail.com".to_string(),
            avatar: String::new(),
        }
    }
}

/// Partial profile update. Only the fields that are `Some` are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl AccountPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    fn apply_to(self, profile: &mut AccountProfile) {
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(email) = self.email {
            profile.email = email;
        }
        if let Some(avatar) = self.avatar {
            profile.avatar = avatar;
        }
    }
}

impl From<AccountProfile> for AccountPatch {
    fn from(profile: AccountProfile) -> Self {
        Self {
            name: Some(profile.name),
            email: Some(profile.email),
            avatar: Some(profile.avatar),
        }
    }
}

/// Holder of the current `AccountProfile`.
#[derive(Debug)]
pub struct AccountSlot {
    tx: watch::Sender<AccountProfile>,
}

impl Default for AccountSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountSlot {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AccountProfile::default());
        Self { tx }
    }

    pub fn read(&self) -> AccountProfile {
        self.tx.borrow().clone()
    }

    /// Observe the slot. The receiver starts at the current value and is
    /// marked changed after every `update` or `reset`.
    pub fn subscribe(&self) -> watch::Receiver<AccountProfile> {
        self.tx.subscribe()
    }

    /// Shallow-merge `patch` into the current profile.
    pub fn update(&self, patch: AccountPatch) {
        self.tx.send_modify(|profile| patch.apply_to(profile));
        tracing::debug!("account profile updated");
    }

    pub fn reset(&self) {
        self.tx.send_replace(AccountProfile::default());
        tracing::debug!("account profile reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_default_profile() {
        let slot = AccountSlot::new();
        let profile = slot.read();
        assert_eq!(profile.name, "Ling");
        assert_eq!(profile.email, "linghypshen@gmail.com");
        assert_eq!(profile.avatar, "");
    }

    #[test]
    fn update_touches_only_present_fields() {
        let slot = AccountSlot::new();
        let before = slot.read();
        slot.update(AccountPatch::default().avatar("a.png"));

        let after = slot.read();
        assert_eq!(after.avatar, "a.png");
        assert_eq!(after.name, before.name);
        assert_eq!(after.email, before.email);
    }

    #[test]
    fn updates_accumulate() {
        let slot = AccountSlot::new();
        slot.update(AccountPatch::default().name("Ada"));
        slot.update(AccountPatch::default().email("ada@example.com"));
        slot.update(AccountPatch::default());

        assert_eq!(
            slot.read(),
            AccountProfile {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                avatar: String::new(),
            }
        );
    }

    #[test]
    fn reset_restores_default() {
        let slot = AccountSlot::new();
        slot.update(AccountPatch::default().name("Ada").avatar("ada.png"));
        slot.update(AccountPatch::default().email("ada@example.com"));
        slot.reset();
        assert_eq!(slot.read(), AccountProfile::default());
    }

    #[test]
    fn subscribers_see_every_mutation() {
        let slot = AccountSlot::new();
        let mut rx = slot.subscribe();
        assert!(!rx.has_changed().unwrap());

        slot.update(AccountPatch::default().avatar("a.png"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().avatar, "a.png");

        slot.reset();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), AccountProfile::default());
    }

    #[test]
    fn patch_from_server_profile() {
        let profile: AccountProfile =
            serde_json::from_str(r#"{"name":"Bo","email":"bo@example.com","avatar":"bo.png"}"#).unwrap();
        let slot = AccountSlot::new();
        slot.update(profile.clone().into());
        assert_eq!(slot.read(), profile);
    }

    #[test]
    fn patch_omits_absent_fields_on_the_wire() {
        let json = serde_json::to_value(AccountPatch::default().name("Ada")).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Ada"}));
    }
}
