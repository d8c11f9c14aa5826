//! Service configuration.

use std::net::{Ipv4Addr, SocketAddr};

use crate::prelude::*;

const PORT_ENV_VAR: &str = "SERVER_PORT";
const DEFAULT_PORT: u16 = 2022;

/// Where the service listens.
pub struct ServerConfig {
    pub port: u16,
}

impl ServerConfig {
    /// Reads `SERVER_PORT`, defaulting to 2022.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: parse_port(std::env::var(PORT_ENV_VAR).ok())?,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

fn parse_port(value: Option<String>) -> Result<u16> {
    match value {
        Some(value) => value.trim().parse().map_err(|_| Error::InvalidConfig {
            var: PORT_ENV_VAR,
            value,
        }),
        None => Ok(DEFAULT_PORT),
    }
}
