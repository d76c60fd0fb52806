//! Participation roles and per-role storage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// A participation category with its own independent capacity.
///
/// The set is closed and ordered: panels always list roles in
/// `Tank`, `Healer`, `DPS` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Tank,
    Healer,
    #[serde(rename = "DPS")]
    Dps,
}

impl Role {
    /// All roles in display order.
    pub const ALL: [Role; 3] = [Role::Tank, Role::Healer, Role::Dps];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Role::Tank => "Tank",
            Role::Healer => "Healer",
            Role::Dps => "DPS",
        }
    }

    /// Lowercase key used inside control identifiers.
    pub fn key(self) -> &'static str {
        match self {
            Role::Tank => "tank",
            Role::Healer => "healer",
            Role::Dps => "dps",
        }
    }

    /// Parses a control identifier key back into a role.
    pub fn from_key(key: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.key() == key)
    }

    fn index(self) -> usize {
        match self {
            Role::Tank => 0,
            Role::Healer => 1,
            Role::Dps => 2,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One value per [`Role`], indexable by role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerRole<T>([T; 3]);

impl<T> PerRole<T> {
    /// Builds a map from explicit per-role values.
    pub fn new(tank: T, healer: T, dps: T) -> Self {
        Self([tank, healer, dps])
    }

    /// Iterates `(role, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &T)> {
        Role::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<Role> for PerRole<T> {
    type Output = T;

    fn index(&self, role: Role) -> &T {
        &self.0[role.index()]
    }
}

impl<T> IndexMut<Role> for PerRole<T> {
    fn index_mut(&mut self, role: Role) -> &mut T {
        &mut self.0[role.index()]
    }
}
