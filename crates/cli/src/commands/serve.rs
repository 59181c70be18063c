//! `arise serve`: start the HTTP gateway.

use super::{CmdResult, load_config, session_from};
use std::path::Path;

pub async fn run(config_path: Option<&Path>, port_override: Option<u16>) -> CmdResult {
    let mut config = load_config(config_path)?;
    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    let session = session_from(&config).await?;

    println!("A.R.I.S.E Gateway");
    println!("   Listening: http://{}:{}", config.gateway.host, config.gateway.port);
    println!("   Provider:  {}", config.default_provider);
    println!("   Documents: {}", config.documents.dir.display());
    match &config.gateway.static_dir {
        Some(dir) => println!("   Site:      {}", dir.display()),
        None => println!("   Site:      embedded chat page"),
    }

    arise_gateway::start(&config, session).await
}
