use shadow_rs::ShadowBuilder;

fn main() {
    // Build metadata backs --version and the version field of status payloads
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
