//! Permission levels.

use std::fmt;

/// Privilege ranking, lowest first.
///
/// Comparisons use the declared order: `None < ServerAdmin < BotAdmin < BotOwner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum PermissionLevel {
    #[default]
    None = 0,
    /// Guild owner, or a member with an administrator role.
    ServerAdmin = 1,
    /// Listed in `BOT_ADMIN_IDS`.
    BotAdmin = 2,
    /// Listed in `BOT_OWNER_IDS`.
    BotOwner = 3,
}

impl PermissionLevel {
    pub const ALL: [PermissionLevel; 4] = [
        Self::None,
        Self::ServerAdmin,
        Self::BotAdmin,
        Self::BotOwner,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "Member",
            Self::ServerAdmin => "Server Admin",
            Self::BotAdmin => "Bot Admin",
            Self::BotOwner => "Bot Owner",
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        use PermissionLevel::*;

        assert!(None < ServerAdmin);
        assert!(ServerAdmin < BotAdmin);
        assert!(BotAdmin < BotOwner);

        for (i, a) in PermissionLevel::ALL.iter().enumerate() {
            for (j, b) in PermissionLevel::ALL.iter().enumerate() {
                assert_eq!(a.cmp(b), i.cmp(&j), "{:?} vs {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_default_is_none() {
        assert_eq!(PermissionLevel::default(), PermissionLevel::None);
    }
}
