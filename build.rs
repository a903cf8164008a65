//! Retrieves information about the version of the game from Git and the build
//! environment. [`shadow_rs`] writes it to the output directory and the crate
//! reads it back through the `build` module.

fn main() -> shadow_rs::SdResult<()> {
    shadow_rs::new()
}
