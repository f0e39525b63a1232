use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub upload: UploadConfig,

    #[serde(default)]
    pub normalize: NormalizeConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Project endpoint, e.g. `https://<project>.supabase.co`
    #[serde(default)]
    pub url: String,

    /// Public (anon) access key sent as `apikey` and bearer token
    #[serde(default)]
    pub anon_key: String,

    /// Storage bucket that receives uploaded images
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Table that receives memory records
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_bucket() -> String {
    "memory-images".to_string()
}

fn default_table() -> String {
    memoria_common::MEMORIES_TABLE.to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            bucket: default_bucket(),
            table: default_table(),
        }
    }
}

impl BackendConfig {
    /// True when both endpoint and key are present.
    pub fn has_credentials(&self) -> bool {
        !self.url.trim().is_empty() && !self.anon_key.trim().is_empty()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadConfig {
    #[serde(default = "default_content_type")]
    pub content_type: String,

    /// Cache lifetime in seconds, sent as `cache-control: max-age=<value>`
    #[serde(default = "default_cache_control")]
    pub cache_control: String,
}

fn default_content_type() -> String {
    "image/jpeg".to_string()
}

fn default_cache_control() -> String {
    "3600".to_string()
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            content_type: default_content_type(),
            cache_control: default_cache_control(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NormalizeConfig {
    /// Resize and re-encode before upload (default: true)
    #[serde(default = "default_normalize_enabled")]
    pub enabled: bool,

    #[serde(default = "default_max_width")]
    pub max_width: u32,

    /// JPEG quality, 1-100
    #[serde(default = "default_quality")]
    pub quality: u8,
}

fn default_normalize_enabled() -> bool {
    true
}

fn default_max_width() -> u32 {
    1200
}

fn default_quality() -> u8 {
    80
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            enabled: default_normalize_enabled(),
            max_width: default_max_width(),
            quality: default_quality(),
        }
    }
}
