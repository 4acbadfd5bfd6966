//! Копирует config.toml из корня workspace рядом с собранным бинарником,
//! где его ищет `shared::config::load_config`.

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let out_dir = env::var("OUT_DIR").unwrap_or_default();
    let profile = env::var("PROFILE").unwrap_or_else(|_| "debug".to_string());

    // OUT_DIR: target/<profile>/build/backend-xxx/out
    let Some(target_dir) = Path::new(&out_dir).ancestors().find(|p| p.ends_with(&profile)) else {
        println!("cargo:warning=target directory not found, config.toml not copied");
        return;
    };

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let source = workspace_root.join("config.toml");
    if !source.exists() {
        println!("cargo:warning=config.toml not found, built-in defaults will be used");
        return;
    }

    if let Err(e) = fs::copy(&source, target_dir.join("config.toml")) {
        println!("cargo:warning=config.toml not copied: {}", e);
    }
}
