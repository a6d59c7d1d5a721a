//! Default and saved input profiles.

mod defaults;
mod store;

pub use defaults::defaults_for;
pub use store::{migrate_profile, ProfileStore, StoredProfile, PROFILE_VERSION};
