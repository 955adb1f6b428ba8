//! User domain types.

use serde::{Deserialize, Serialize};

/// Role flag stored on a user record.
///
/// Wire/storage format: `u8` (0 = Standard, 1 = Admin). User records are
/// provisioned out-of-band; this service only reads them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Standard = 0,
    Admin = 1,
}

impl UserRole {
    /// Convert from `u8` storage value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Standard),
            1 => Some(Self::Admin),
            _ => None,
        }
    }

    /// Convert to `u8` storage value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}
