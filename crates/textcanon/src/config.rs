//! # Configuration
//!
//! Settings are loaded with [`confique`], layered in priority order:
//! 1. **Environment variables**: `TEXTCANON_STRICT_WRITES`.
//! 2. **TOML file**: an optional path handed to [`CanonConfig::load`].
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `strict_writes` | `false` | Validate raw text on save instead of only on load |

use std::path::Path;

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::encoding::WritePolicy;
use crate::error::Result;

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CanonConfig {
    /// Reject invalid UTF-8 at write time. When false, invalid bytes are
    /// stored unchanged and reported when read back.
    #[config(env = "TEXTCANON_STRICT_WRITES", default = false)]
    pub strict_writes: bool,
}

impl Default for CanonConfig {
    fn default() -> Self {
        Self {
            strict_writes: false,
        }
    }
}

impl CanonConfig {
    /// Load from environment, then `path` (if any), then defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    pub fn write_policy(&self) -> WritePolicy {
        if self.strict_writes {
            WritePolicy::Strict
        } else {
            WritePolicy::Trusting
        }
    }
}
