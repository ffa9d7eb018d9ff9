use std::fs;

fn main() {
    // The compiled-in defaults fall back to Config::default() when they
    // fail to parse, so a broken file has to fail the build instead.
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");

    // Syntax only; unknown keys are ignored by serde(default) sections.
    if let Err(e) = content.parse::<toml::Table>() {
        panic!("Invalid default_config.toml: {}", e);
    }
}
