mod amount;
mod identity;
mod ids;

pub use amount::Amount;
pub use identity::{Identity, NewIdentity, ProfileUpdate, PublicUser};
pub use ids::UserId;
