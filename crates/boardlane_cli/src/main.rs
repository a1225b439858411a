//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `boardlane_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("boardlane_core ping={}", boardlane_core::ping());
    println!("boardlane_core version={}", boardlane_core::core_version());
}
