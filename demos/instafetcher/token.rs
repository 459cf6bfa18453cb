// Copyright © 2022 Nikita Dudko. All rights reserved.
// Contacts: <nikita.dudko.95@gmail.com>
// Licensed under the MIT License.

use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};
use serde::{Deserialize, Serialize};

/// What gets persisted between runs.
#[derive(Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    pub username: Option<String>,
}

pub fn load(path: Option<&Path>) -> Result<StoredToken, Box<dyn Error>> {
    const LOGIN_SUGGESTION: &str = "(use --log-in to perform authorization)";

    let path = match path {
        Some(path) => path.to_path_buf(),
        None => self::path(),
    };
    if !path.exists() {
        return Err(format!("file {} doesn't exist {}", path.display(), LOGIN_SUGGESTION).into());
    }

    let json = fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&json)?)
}

pub fn save(token: &StoredToken, path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => self::path(),
    };

    let json = serde_json::to_string(token)?;
    fs::write(&path, json)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = fs::metadata(&path) {
            let mut perms = metadata.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&path, perms).ok();
        }
    }

    println!("Token saved to {}", path.display());
    Ok(())
}

pub fn path() -> PathBuf {
    let mut path = Path::new(
        format!("{}-token", env!("CARGO_CRATE_NAME")).as_str()
    ).with_extension("json");

    if let Some(dir) = dirs::config_dir() {
        if dir.exists() || fs::create_dir_all(&dir).is_ok() {
            path = dir.join(path);
        }
    }
    path
}
