fn main() -> anyhow::Result<()> {
    let port = std::env::var("APP_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8000);

    let doc = permission_engine::docs::build_openapi(port)?;
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
