use crate::avatar::read::DEFAULT_MAX_AVATAR_BYTES;

use std::path::PathBuf;

#[derive(clap::Parser)]
pub struct Config {
    /// JSON file holding the profile being edited
    #[clap(long, env, default_value = "profile.json")]
    pub profile_path: PathBuf,

    /// Largest avatar image accepted, in bytes
    #[clap(long, env, default_value_t = DEFAULT_MAX_AVATAR_BYTES)]
    pub avatar_max_bytes: u64,
}
