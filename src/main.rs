// Copyright (c) 2025 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

#![forbid(non_ascii_idents)]
#![deny(unsafe_code)]

use std::net::TcpListener;
use std::path::Path;

use actix::Actor;
use actix_web::{App, HttpServer, middleware, web};
use clap::Parser;
use log::info;
use voice_av_dispatch::{APP_VERSION, built_info};
use voice_av_dispatch::client::DeviceClient;
use voice_av_dispatch::configuration::{DEF_CONFIG_FILE, get_configuration};
use voice_av_dispatch::dispatch::Dispatcher;
use voice_av_dispatch::server::{self, json_error_handler};

#[derive(Parser)]
#[command(author = "Unfolded Circle ApS", version = APP_VERSION, about = "Voice assistant intent dispatcher for TV, streaming box and AV receiver controllers")]
struct Opt {
    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let opt = Opt::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg_file = match opt.config.as_deref() {
        None => {
            if Path::new(DEF_CONFIG_FILE).exists() {
                info!("Loading default configuration file: {DEF_CONFIG_FILE}");
                Some(DEF_CONFIG_FILE)
            } else {
                None
            }
        }
        Some(c) => Some(c),
    };
    let cfg = get_configuration(cfg_file)?;

    let address = format!(
        "{}:{}",
        cfg.integration.interface, cfg.integration.http.port
    );
    let listener = TcpListener::bind(&address)?;
    info!("{} {APP_VERSION} listening on: {address}", built_info::PKG_NAME);

    let json_limit = cfg.integration.json_limit_kb * 1024;
    let device_client = DeviceClient::new(&cfg.devices).start();
    let dispatcher = Dispatcher::new(&cfg, device_client.recipient());

    for room in dispatcher.rooms() {
        info!(
            "Room {} ({}): receiver: {}, inputs: {}, application id check: {}",
            room.id(),
            room.name(),
            room.has_receiver(),
            room.resolver().targets().len(),
            room.app_id().is_some()
        );
    }
    let dispatcher = web::Data::new(dispatcher);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(
                web::JsonConfig::default()
                    .limit(json_limit) // limit size of the payload (global configuration)
                    .error_handler(json_error_handler),
            )
            .app_data(dispatcher.clone())
            .configure(server::configure)
    })
    .workers(1)
    .listen(listener)?
    .run()
    .await?;

    Ok(())
}
