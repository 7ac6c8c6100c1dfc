/// ----- CONFIG MODULE -----
/// Reads `config.json` (or the shipped `_config.json` when there is none)
/// and applies command line overrides.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::io;
use std::time::Duration;

use log::{info, warn};
use thiserror::Error;

use dispatch::{DispatchError, Shaft};

const FILE_PATH: &str = "config.json";
const FALLBACK_FILE_PATH: &str = "_config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read configuration: {0}")]
    Io(#[from] io::Error),

    #[error("cannot parse configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration is missing `{section}.{key}`")]
    MissingKey { section: &'static str, key: &'static str },

    #[error(transparent)]
    Shaft(#[from] DispatchError),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct ConfigFile {
    pub server: HashMap<String, u16>,
    pub elevator: HashMap<String, u8>,
    pub doors: HashMap<String, u64>,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DoorConfig {
    pub open_duration: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub shaft: Shaft,
    pub doors: DoorConfig,
}

fn lookup<T: Copy>(
    map: &HashMap<String, T>,
    section: &'static str,
    key: &'static str,
) -> Result<T, ConfigError> {
    map.get(key)
        .copied()
        .ok_or(ConfigError::MissingKey { section, key })
}

impl Config {
    pub fn get() -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(FILE_PATH) {
            Ok(content) => content,
            Err(_) => {
                info!("No configuration file provided, using default settings...");
                fs::read_to_string(FALLBACK_FILE_PATH)?
            }
        };
        let args: Vec<String> = env::args().collect();
        Config::parse(&contents, &args)
    }

    pub fn parse(contents: &str, args: &[String]) -> Result<Self, ConfigError> {
        let config_file: ConfigFile = serde_json::from_str(contents)?;
        let port = lookup(&config_file.server, "server", "port")?;
        let bottom = lookup(&config_file.elevator, "elevator", "bottom_floor")?;
        let top = lookup(&config_file.elevator, "elevator", "top_floor")?;
        let open_secs = lookup(&config_file.doors, "doors", "open_secs")?;

        Ok(Config {
            server: ServerConfig {
                port: parse_env_args(args, port),
            },
            shaft: Shaft::new(bottom, top)?,
            doors: DoorConfig {
                open_duration: Duration::from_secs(open_secs),
            },
        })
    }
}

/// `--serverport <port>` pairs, counted from the end of the command line.
fn parse_env_args(args: &[String], defaultport: u16) -> u16 {
    let mut serverport = defaultport;

    for arg_pair in args.rchunks_exact(2) {
        match arg_pair[0].as_str() {
            "--serverport" => {
                serverport = match arg_pair[1].parse::<u16>() {
                    Ok(num) => num,
                    Err(_) => {
                        warn!("port {} is not a number, skipping...", arg_pair[1]);
                        serverport
                    }
                };
            }
            _ => warn!("illegal argument {}, skipping...", arg_pair[0]),
        }
    }
    serverport
}
