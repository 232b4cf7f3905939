//! Build script that installs the `.env.example` configuration template.
//!
//! The template is copied into the user's local data directory
//! (`<data_local_dir>/spotrand/.env.example`) so it sits next to the `.env`
//! file the binary reads at startup.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("spotrand");

    if !env_example_path.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
        return Ok(());
    }

    // read-only build sandboxes are fine; the template is a convenience
    if let Err(e) = fs::create_dir_all(&out_dir)
        .and_then(|_| fs::copy(&env_example_path, out_dir.join(".env.example")))
    {
        println!("cargo:warning=cannot install .env.example: {}", e);
    }

    Ok(())
}
