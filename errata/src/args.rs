use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// errata problem-details service
#[derive(Debug, Parser)]
#[command(name = "errata", about = "HTTP service rendering errors as RFC 9457 problem details")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "errata.toml", env = "ERRATA_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "ERRATA_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Override the log filter, e.g. `debug` or `info,errata_server=trace`
    #[arg(long, env = "ERRATA_LOG")]
    pub log_filter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["errata"]).unwrap();
        assert_eq!(args.config, PathBuf::from("errata.toml"));
        assert!(args.listen.is_none());
    }

    #[test]
    fn overrides() {
        let args = Args::try_parse_from([
            "errata",
            "-c",
            "/etc/errata.toml",
            "--listen",
            "127.0.0.1:9000",
            "--log-filter",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.config, PathBuf::from("/etc/errata.toml"));
        assert_eq!(args.listen, Some(SocketAddr::from(([127, 0, 0, 1], 9000))));
        assert_eq!(args.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn invalid_listen_address_is_rejected() {
        assert!(Args::try_parse_from(["errata", "--listen", "nowhere"]).is_err());
    }
}
