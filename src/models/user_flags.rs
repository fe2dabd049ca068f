/*
 * Responsibility
 * - ユーザーに付与される権限フラグ (bitset)
 * - ADMINISTRATOR は通常のフラグではなく、全ての要求を満たす override
 */
use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Capability bits granted to a user.
    ///
    /// Stored as a 32-bit integer column, so bit positions are part of the
    /// persisted format and must not be renumbered.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct UserFlags: u32 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
        const UPLOAD = 1 << 2;
        const MODERATE = 1 << 3;
        /// Bypasses every capability requirement.
        const ADMINISTRATOR = 1 << 31;
    }
}

impl Default for UserFlags {
    fn default() -> Self {
        UserFlags::NONE
    }
}

impl UserFlags {
    /// No capability required / granted.
    pub const NONE: Self = Self::empty();

    /// `true` when every bit of `required` is set, or the administrator bit is.
    pub fn satisfies(self, required: UserFlags) -> bool {
        if self.contains(required) {
            return true;
        }

        // administrators have access to every endpoint
        self.contains(UserFlags::ADMINISTRATOR)
    }

    pub fn is_administrator(self) -> bool {
        self.contains(UserFlags::ADMINISTRATOR)
    }

    /// Names of the known flags that are set (unknown bits are skipped).
    pub fn names(self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).collect()
    }

    /// Rebuild from the integer column. Unknown bits are kept so that a
    /// newer schema does not silently lose grants.
    pub fn from_db(value: i32) -> Self {
        Self::from_bits_retain(value as u32)
    }

    pub fn to_db(self) -> i32 {
        self.bits() as i32
    }
}

impl fmt::Display for UserFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        f.write_str(&self.names().join("|"))
    }
}
