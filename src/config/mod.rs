use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct ConfigFile {
    pub group_id: Option<u64>,
    pub token: Option<String>,
    pub problems: Option<Vec<u64>>,
    pub problem_names: Option<HashMap<u64, String>>,
    pub api_base: Option<String>,
    pub web_base: Option<String>,
    pub count: Option<u32>,
    pub name_filter: Option<String>,
    pub rate: Option<u32>,
    pub concurrency: Option<u32>,
    pub timeout: Option<usize>,
    pub workers: Option<usize>,
    pub output: Option<String>,
    pub output_format: Option<String>,
    pub proxy: Option<String>,
    pub no_color: Option<bool>,
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("USERPROFILE").map(PathBuf::from))
        .or_else(|| {
            let drive = env::var_os("HOMEDRIVE")?;
            let path = env::var_os("HOMEPATH")?;
            Some(PathBuf::from(drive).join(path))
        })
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(home_dir()?.join(".ojboard").join("config.yml"))
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        if let Some(home) = home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

pub fn expand_tilde_string(path: &str) -> String {
    expand_tilde(path).to_string_lossy().to_string()
}

pub fn load_config(path: &PathBuf, allow_missing: bool) -> Result<ConfigFile, String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => serde_yaml::from_str::<ConfigFile>(&contents)
            .map_err(|e| format!("failed to parse config '{}': {e}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
            Ok(ConfigFile::default())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(format!("config file not found '{}'", path.display()))
        }
        Err(e) => Err(format!("failed to read config '{}': {e}", path.display())),
    }
}

pub(crate) fn default_config_yaml() -> String {
    r#"# ojboard config
#
# Location (default):
#   ~/.ojboard/config.yml

# Contest group (required)
# group_id: 11

# API token (required; copy it from your logged-in browser session)
# token: "..."

# Problems to track, in column order (required)
# problems:
#   - 714
#   - 715

# Optional display names for the header row
# problem_names:
#   714: A
#   715: B

# Endpoints
# api_base: https://api.oj.nctu.me
# web_base: https://oj.nctu.me

# Submissions fetched per problem
count: 1048576

# Only rank contestants whose name matches (7-digit student ids)
name_filter: "^\\d{7}$"

# Performance
rate: 10
concurrency: 4
timeout: 10
workers: 4

# Output (optional)
# output: ./scoreboard.html
# output_format: html

# Output styling
no_color: false
"#
    .to_string()
}

pub fn ensure_default_config_file(path: &PathBuf) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    let parent = path
        .parent()
        .ok_or_else(|| format!("invalid config path '{}'", path.display()))?;
    std::fs::create_dir_all(parent).map_err(|e| {
        format!(
            "failed to create config directory '{}': {e}",
            parent.display()
        )
    })?;
    let contents = default_config_yaml();
    std::fs::write(path, contents)
        .map_err(|e| format!("failed to write config file '{}': {e}", path.display()))?;
    Ok(())
}
