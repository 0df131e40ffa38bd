use std::{env, path::PathBuf};

fn main() {
    let dest = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set")).join("built.rs");
    built::write_built_file_with_opts(&dest).expect("Failed to acquire build-time information");
}
