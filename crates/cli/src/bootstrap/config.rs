use authdns_domain::Config;

pub fn load_config(
    config_path: Option<&str>,
    listen_override: Option<&str>,
) -> anyhow::Result<Config> {
    let mut config = Config::load(config_path)?;
    if let Some(listen) = listen_override {
        config.server.listen = listen.to_string();
    }
    config.validate()?;
    Ok(config)
}
