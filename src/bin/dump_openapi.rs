use std::fs;

use eureka_roles::AppConfig;

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let path = std::env::args().nth(1).unwrap_or_else(|| "openapi.json".to_string());
    let config = AppConfig::from_env()?;
    let doc = eureka_roles::docs::build_openapi(config.port, &config.identity_header)?;
    let s = serde_json::to_string_pretty(&doc)?;
    fs::write(&path, s)?;
    println!("wrote {}", path);
    Ok(())
}
