//! Group membership tracking.
//!
//! The roster is a set of account names built from squad update batches.
//! The derived `grouped` flag is recomputed once per batch so a batch that
//! churns members produces at most one persisted transition.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

/// Member role as reported by the roster source. Wire values match the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum UserRole {
    SquadLeader,
    Lieutenant,
    Member,
    Invited,
    Applied,
    /// Member left the group.
    #[default]
    None,
    Invalid,
}

impl UserRole {
    /// `None` and `Invalid` both mean "not an active member".
    pub fn is_departed(self) -> bool {
        matches!(self, Self::None | Self::Invalid)
    }
}

impl From<u8> for UserRole {
    fn from(raw: u8) -> Self {
        match raw {
            0 => Self::SquadLeader,
            1 => Self::Lieutenant,
            2 => Self::Member,
            3 => Self::Invited,
            4 => Self::Applied,
            5 => Self::None,
            _ => Self::Invalid,
        }
    }
}

impl From<UserRole> for u8 {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::SquadLeader => 0,
            UserRole::Lieutenant => 1,
            UserRole::Member => 2,
            UserRole::Invited => 3,
            UserRole::Applied => 4,
            UserRole::None => 5,
            UserRole::Invalid => 6,
        }
    }
}

/// One entry of a roster update batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterEntry {
    /// Missing names are skipped.
    pub account_name: Option<String>,
    pub role: UserRole,
    pub subgroup: u8,
    pub ready: bool,
}

impl RosterEntry {
    pub fn new(account_name: impl Into<String>, role: UserRole) -> Self {
        Self {
            account_name: Some(account_name.into()),
            role,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GroupRoster {
    members: HashSet<String>,
    grouped: bool,
}

impl GroupRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a batch. Returns the new grouped flag only when it changed.
    pub fn apply_update(&mut self, entries: &[RosterEntry]) -> Option<bool> {
        if entries.is_empty() {
            return None;
        }

        for entry in entries {
            let Some(name) = entry.account_name.as_deref() else {
                tracing::debug!(role = ?entry.role, "Roster entry without account name skipped");
                continue;
            };

            if entry.role.is_departed() {
                self.members.remove(name);
                tracing::debug!(account = name, "Group member removed");
            } else {
                self.members.insert(name.to_string());
                tracing::debug!(
                    account = name,
                    role = ?entry.role,
                    subgroup = entry.subgroup,
                    "Group member added"
                );
            }
        }

        let now_grouped = !self.members.is_empty();
        if now_grouped == self.grouped {
            return None;
        }

        self.grouped = now_grouped;
        tracing::info!(
            grouped = now_grouped,
            members = self.members.len(),
            "Group status changed"
        );
        Some(now_grouped)
    }

    pub fn is_grouped(&self) -> bool {
        self.grouped
    }

    pub fn contains(&self, account_name: &str) -> bool {
        self.members.contains(account_name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn clear(&mut self) {
        self.members.clear();
        self.grouped = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn join(name: &str) -> RosterEntry {
        RosterEntry::new(name, UserRole::Member)
    }

    fn leave(name: &str) -> RosterEntry {
        RosterEntry::new(name, UserRole::None)
    }

    #[test]
    fn test_add_then_remove_all() {
        let mut roster = GroupRoster::new();
        assert_eq!(
            roster.apply_update(&[join("a.1234"), join("b.1234"), join("c.1234")]),
            Some(true)
        );
        assert_eq!(roster.len(), 3);

        assert_eq!(roster.apply_update(&[leave("a.1234"), leave("b.1234")]), None);
        assert!(roster.is_grouped());

        assert_eq!(
            roster.apply_update(&[RosterEntry::new("c.1234", UserRole::Invalid)]),
            Some(false)
        );
        assert!(roster.is_empty());
    }

    #[test]
    fn test_churn_in_one_batch_reports_once() {
        let mut roster = GroupRoster::new();
        let batch = [join("a.1234"), leave("a.1234"), join("a.1234")];
        assert_eq!(roster.apply_update(&batch), Some(true));
        assert!(roster.contains("a.1234"));

        // Same batch again: still grouped, no transition
        assert_eq!(roster.apply_update(&batch), None);
    }

    #[test]
    fn test_empty_batch_and_nameless_entries() {
        let mut roster = GroupRoster::new();
        assert_eq!(roster.apply_update(&[]), None);

        let nameless = RosterEntry {
            account_name: None,
            role: UserRole::SquadLeader,
            ..Default::default()
        };
        assert_eq!(roster.apply_update(&[nameless]), None);
        assert!(!roster.is_grouped());
    }

    #[test]
    fn test_duplicate_entries_overwrite() {
        let mut roster = GroupRoster::new();
        roster.apply_update(&[
            RosterEntry::new("a.1234", UserRole::Invited),
            RosterEntry::new("a.1234", UserRole::Lieutenant),
        ]);
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_every_active_role_counts() {
        for raw in 0u8..=4 {
            let mut roster = GroupRoster::new();
            assert_eq!(
                roster.apply_update(&[RosterEntry::new("a.1234", UserRole::from(raw))]),
                Some(true),
                "role {raw}"
            );
        }
    }

    #[test]
    fn test_clear_resets_flag() {
        let mut roster = GroupRoster::new();
        roster.apply_update(&[join("a.1234")]);
        roster.clear();
        assert!(!roster.is_grouped());
        assert_eq!(roster.apply_update(&[join("a.1234")]), Some(true));
    }
}
