// File: crates/chart-render-skia/build.rs
// Summary: Links the Windows system libraries Skia's font manager and ICU expect.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // registry lookups for system fonts
        println!("cargo:rustc-link-lib=advapi32");
    }
}
