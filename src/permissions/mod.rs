//! Permission system for privileged commands.
//!
//! Every user has one effective [`PermissionLevel`], resolved by the
//! [`PermissionAuthority`] from three independent sources:
//!
//! - `BOT_OWNER_IDS` → `BotOwner`
//! - `BOT_ADMIN_IDS` → `BotAdmin`
//! - guild ownership or an administrator role → `ServerAdmin`
//!
//! ## Usage
//!
//! ```rust,ignore
//! if !ctx.has_permission(&interaction, PermissionLevel::BotAdmin).await {
//!     // refuse
//! }
//! ```

mod checker;
mod level;

pub use checker::{PermissionAuthority, PermissionConfig};
pub use level::PermissionLevel;
