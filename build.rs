//! Build script for the Spotify Terminal Controller.
//!
//! Copies the `.env.example` template into the user's configuration
//! directory, next to where the application looks for its `.env` file and
//! keeps its token cache:
//! - Linux: `~/.config/spotify-cli/.env.example`
//! - macOS: `~/Library/Application Support/spotify-cli/.env.example`
//! - Windows: `%APPDATA%/spotify-cli/.env.example`
//!
//! A missing template only produces a cargo warning.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Re-run if the template changes
    println!("cargo:rerun-if-changed=.env.example");

    // Where to copy FROM (crate root)
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("spotify-cli");

    if env_example_path.is_file() {
        // copy failures are reported, never fatal
        if let Err(e) = fs::create_dir_all(&out_dir)
            .and_then(|_| fs::copy(&env_example_path, out_dir.join(".env.example")))
        {
            println!(
                "cargo:warning=cannot copy .env.example to {}: {}",
                out_dir.display(),
                e
            );
        }
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
