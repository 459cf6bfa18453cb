// Copyright © 2022 Nikita Dudko. All rights reserved.
// Contacts: <nikita.dudko.95@gmail.com>
// Licensed under the MIT License.

mod media;
mod token;

use instagram_client::{auth, Client, ClientConfig};

use std::{fs, process};
use std::{ffi::OsStr, path::{Path, PathBuf}};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(about, author, version)]
#[clap(name = env!("CARGO_CRATE_NAME"))]
#[clap(arg_required_else_help = true)]
struct Cli {
    /// Perform authorization and save a token
    #[clap(short, long)]
    log_in: bool,

    /// Print the user profile information
    #[clap(short, long)]
    info: bool,

    /// Download all user's images
    #[clap(short, long, value_name = "DIR")]
    #[clap(forbid_empty_values = true, parse(try_from_os_str = validate_output_dir))]
    media: Option<PathBuf>,

    /// Number of media items requested per page
    #[clap(long, default_value_t = 20)]
    page_size: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    // Credentials come from INSTAGRAM_APP_ID, INSTAGRAM_APP_SECRET and INSTAGRAM_OAUTH_URI.
    let client = match ClientConfig::from_env().and_then(Client::new) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    if cli.log_in {
        run_or_exit(|| log_in(&client));
    }
    if cli.info || cli.media.is_some() {
        run_or_exit(|| load_token(&client));
    }
    if cli.info {
        run_or_exit(|| print_info(&client));
    }
    if let Some(dir) = cli.media.as_deref() {
        run_or_exit(|| media::download_all(&client, dir, cli.page_size));
    }
}

/// Performs authorization and saves the received token.
fn log_in(client: &Client) -> Result<(), String> {
    let token_path = token::path();
    if token_path.exists() {
        println!("Warning: existing token will be overwritten");
    }

    let login_url = client
        .config()
        .login_url(None)
        .map_err(|e| format!("Couldn't build the login URL: {}", e))?;
    let code = auth::request_code(&login_url).map_err(|e| format!("Couldn't request a code: {}", e))?;

    println!("Exchanging the code for a token...");
    let token = client.authorize(&code).map_err(|e| format!("Couldn't retrieve the token: {}", e))?;

    let stored = token::StoredToken {
        access_token: token.access_token,
        username: token.user.map(|user| user.username),
    };
    token::save(&stored, Some(token_path.as_path())).map_err(|e| format!("Couldn't save the token: {}", e))
}

fn load_token(client: &Client) -> Result<(), String> {
    let stored = token::load(None).map_err(|e| format!("Couldn't load a token: {}", e))?;
    client.set_access_token(stored.access_token);
    Ok(())
}

/// Displays the basic user information.
fn print_info(client: &Client) -> Result<(), String> {
    println!("Retrieving the user profile information...");
    let envelope = client
        .current_user()
        .map_err(|e| format!("Couldn't retrieve the information: {}", e))?;

    let user = &envelope["data"];
    println!(
        "\nUser ID: {}\nUsername: @{}\nFull name: {}\nMedia count: {}\nFollowers: {}",
        user["id"].as_str().unwrap_or("?"),
        user["username"].as_str().unwrap_or("?"),
        user["full_name"].as_str().unwrap_or(""),
        user["counts"]["media"],
        user["counts"]["followed_by"],
    );
    Ok(())
}

/// If `func` returns `Err`, prints an error message and terminates the current process.
fn run_or_exit<F: FnOnce() -> Result<(), String>>(func: F) {
    if let Err(message) = func() {
        eprintln!("{}", message);
        process::exit(1);
    }
}

/// If a directory exists, checks if it empty and readable, otherwise creates a new one.
fn validate_output_dir(path: &OsStr) -> Result<PathBuf, String> {
    let path = Path::new(path);
    if path.exists() {
        if path.is_file() {
            return Err("it's a file".into());
        }
        match path.read_dir() {
            Ok(mut contents) => if contents.next().is_some() {
                return Err("directory must be empty".into());
            },
            Err(e) => return Err(format!("unable to read directory ({})", e)),
        }
    } else if let Err(e) = fs::create_dir(path) {
        return Err(format!("failed to create directory ({})", e));
    }
    Ok(path.to_path_buf())
}
