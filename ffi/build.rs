//! Generates `include/heroiq.h` from the `extern "C"` surface.

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src");

    let crate_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR unset: {e}");
            return;
        }
    };

    let generated = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("HEROIQ_H")
        .with_cpp_compat(true)
        .generate();

    // A header failure must not break the Rust build.
    match generated {
        Ok(bindings) => {
            bindings.write_to_file(crate_dir.join("include").join("heroiq.h"));
        }
        Err(e) => println!("cargo:warning=cbindgen failed, header not regenerated: {e}"),
    }
}
