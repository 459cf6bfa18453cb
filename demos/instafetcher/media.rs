// Copyright © 2022 Nikita Dudko. All rights reserved.
// Contacts: <nikita.dudko.95@gmail.com>
// Licensed under the MIT License.

//! Functions to download media files.

use instagram_client::{user::SELF, Client};

use std::{
    error::Error,
    fs::File,
    io,
    path::{Path, PathBuf},
};
use serde_json::Value;
use threadpool::ThreadPool;
use url::Url;

/// Walks through all pages of the user's recent media and downloads
/// the standard resolution images to `output_dir`.
pub fn download_all(client: &Client, output_dir: &Path, page_size: u32) -> Result<(), String> {
    println!("Gathering information about the user's media...");
    let first = client
        .user_media(SELF, Some(page_size))
        .map_err(|e| format!("Couldn't gather the information: {}", e))?;

    let pool = ThreadPool::new(num_cpus::get());
    let mut envelope = Some(first.clone());
    let mut pages = client.pages(first, Some(page_size));

    while let Some(page) = envelope.take() {
        for item in page["data"].as_array().into_iter().flatten() {
            let (id, url) = match (item["id"].as_str(), image_url(item)) {
                (Some(id), Some(url)) => (id.to_string(), url),
                _ => continue,
            };
            let output_dir = output_dir.to_path_buf();
            pool.execute(move || match download_file(&id, &url, &output_dir) {
                Ok(path) => println!("Saved {}", path.display()),
                Err(e) => eprintln!("Failed to download media with ID {}: {}", id, e),
            });
        }

        envelope = match pages.next() {
            Some(Ok(page)) => Some(page),
            Some(Err(e)) => {
                eprintln!("Couldn't fetch the next page: {}", e);
                None
            }
            None => None,
        };
    }
    pool.join();
    Ok(())
}

fn image_url(item: &Value) -> Option<Url> {
    item["images"]["standard_resolution"]["url"].as_str().and_then(|url| Url::parse(url).ok())
}

/// Downloads the file at `url` to `output_dir`, naming it after the media ID.
/// Extension is taken from the URL.
fn download_file(id: &str, url: &Url, output_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let mut filename = id.to_string();
    if let Some(extension) = Path::new(url.path()).extension().and_then(|e| e.to_str()) {
        filename.push('.');
        filename.push_str(extension);
    }

    let filepath = output_dir.join(filename);
    let mut file = File::create(&filepath)?;

    let response = reqwest::blocking::get(url.clone())?.error_for_status()?;
    let mut content = io::Cursor::new(response.bytes()?);
    io::copy(&mut content, &mut file)?;

    Ok(filepath)
}
