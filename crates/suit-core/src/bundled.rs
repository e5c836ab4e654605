use rust_embed::Embed;

#[derive(Embed)]
#[folder = "$CARGO_MANIFEST_DIR/assets/steering/"]
struct SteeringAssets;

/// Steering documents shipped with suit, in display order. These are the
/// only `Bundled` identifiers; everything else in the steering directory is
/// `Custom`.
pub const BUNDLED_STEERING: &[&str] = &["product", "tech", "structure", "strategy-tdd-bdd"];

pub fn is_bundled(identifier: &str) -> bool {
    BUNDLED_STEERING.contains(&identifier)
}

pub fn identifiers() -> &'static [&'static str] {
    BUNDLED_STEERING
}

/// Embedded content of a bundled document.
pub fn content(identifier: &str) -> Option<String> {
    if !is_bundled(identifier) {
        return None;
    }
    <SteeringAssets as Embed>::get(&format!("{identifier}.md"))
        .map(|f| String::from_utf8_lossy(&f.data).into_owned())
}
