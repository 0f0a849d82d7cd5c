use std::env;

use anyhow::{bail, Result};

use crate::constants::MESSAGE_MISSING_ENV;

#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    pub anon_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let url = env::var("SUPABASE_URL").unwrap_or_default();
        let anon_key = env::var("SUPABASE_ANON_KEY").unwrap_or_default();
        if url.is_empty() || anon_key.is_empty() {
            bail!("{}", MESSAGE_MISSING_ENV);
        }
        Ok(Self { url, anon_key })
    }
}
