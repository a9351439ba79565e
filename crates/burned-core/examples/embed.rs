//! Embed glue example
//!
//! Shows how hosting pages turn a query string or server name into the
//! iframe source, and what a declarative container's attributes parse to.
//!
//! Run with: cargo run -p burned-core --example embed

use std::collections::HashMap;

use burned_core::embed::{player_url_from_query, ServerMap};
use burned_core::PlayerConfig;

fn main() {
    println!("BurnedPlayer Core - Embed Example");
    println!("=================================\n");

    println!("Video id lookup:");
    println!("----------------");
    for query in ["?id=abc123", "?id=my%20clip&autoplay=1", "?foo=bar"] {
        match player_url_from_query(query) {
            Ok(url) => println!("  {:<28} -> {}", query, url),
            Err(e) => println!("  {:<28} -> error: {}", query, e),
        }
    }
    println!();

    println!("Server map:");
    println!("-----------");
    let servers = ServerMap::from_json(
        r#"{
            "main": "https://cdn.example.com/live/main.m3u8",
            "backup": "https://backup.example.com/live/main.m3u8"
        }"#,
    );
    match servers {
        Ok(servers) => {
            for name in ["main", "backup", "missing"] {
                match servers.resolve(name) {
                    Ok(url) => println!("  {:<8} -> {}", name, url),
                    Err(e) => println!("  {:<8} -> error: {}", name, e),
                }
            }
        }
        Err(e) => println!("  invalid server map: {}", e),
    }
    println!();

    println!("Declarative container:");
    println!("----------------------");
    let attrs: HashMap<&str, &str> = [
        ("src", "https://cdn.example.com/live/main.m3u8"),
        ("autoplay", "true"),
        ("height", "360px"),
    ]
    .into_iter()
    .collect();
    let config = PlayerConfig::from_attributes(|key| attrs.get(key).map(|v| v.to_string()));
    println!("  source:   {}", config.source().unwrap_or("(none)"));
    println!("  autoplay: {}", config.autoplay);
    println!("  controls: {}", config.controls_enabled);
    println!("  size:     {} x {}", config.width, config.height);
}
