use std::net::SocketAddr;

use anyhow::{Context, Result};

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  pub port: u16,
  /// Set when `PORT` was unset or empty.
  pub defaulted: bool,
}

impl Config {
  pub fn from_env() -> Result<Config> {
    Config::from_port_var(std::env::var("PORT").ok().as_deref())
  }

  pub fn from_port_var(value: Option<&str>) -> Result<Config> {
    match value.map(str::trim) {
      None | Some("") => Ok(Config { port: DEFAULT_PORT, defaulted: true }),
      Some(port) => {
        let port = port
          .parse::<u16>()
          .with_context(|| format!("PORT must be a port number, got {:?}", port))?;
        Ok(Config { port, defaulted: false })
      }
    }
  }

  /// Listens on every interface.
  pub fn addr(&self) -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], self.port))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_when_unset_or_empty() {
    assert_eq!(Config::from_port_var(None).unwrap(), Config { port: 8080, defaulted: true });
    assert_eq!(Config::from_port_var(Some("")).unwrap(), Config { port: 8080, defaulted: true });
  }

  #[test]
  fn reads_port() {
    let config = Config::from_port_var(Some("9000")).unwrap();
    assert_eq!(config.port, 9000);
    assert!(!config.defaulted);
    assert_eq!(config.addr().to_string(), "0.0.0.0:9000");
  }

  #[test]
  fn rejects_garbage() {
    let err = Config::from_port_var(Some("abc")).unwrap_err();
    assert!(err.to_string().contains("abc"));
    assert!(Config::from_port_var(Some("70000")).is_err());
  }
}
