//! Configuration loading from the command line.

use std::ffi::OsString;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use clap::{ArgAction, Parser};
use thiserror::Error;

use crate::config::schema::{ServerConfig, DEFAULT_PORT};

/// Error type for configuration values clap cannot parse on its own.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Liveness delay is not a valid duration.
    #[error("invalid duration {input:?}: {reason}")]
    InvalidDuration { input: String, reason: String },
}

/// Command-line flags of the diagnostic server.
#[derive(Debug, Parser)]
#[command(name = "diag-server", version)]
#[command(about = "Diagnostic HTTP server exposing echo, health, liveness and call probes", long_about = None)]
pub struct Cli {
    /// Main port to serve on; always on /echo and /call
    #[arg(short = 's', long, default_value_t = DEFAULT_PORT)]
    pub server_port: u16,

    /// Port to serve health checks on; always on /health
    #[arg(short = 'c', long, default_value_t = DEFAULT_PORT)]
    pub health_port: u16,

    /// Port to serve liveness checks on; always on /live
    #[arg(short = 'l', long, default_value_t = DEFAULT_PORT)]
    pub liveness_port: u16,

    /// If false, the health check will report unhealthy
    #[arg(
        long,
        default_value_t = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub healthy: bool,

    /// Delay before the server reports being alive (e.g. 1s, 250ms, 1m30s)
    #[arg(long, default_value = "1s", value_parser = parse_duration, allow_hyphen_values = true)]
    pub liveness_delay: Duration,

    /// Interface every listener binds to
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        Self {
            host: cli.host,
            server_port: cli.server_port,
            health_port: cli.health_port,
            liveness_port: cli.liveness_port,
            healthy: cli.healthy,
            liveness_delay: cli.liveness_delay,
        }
    }
}

/// Parse command-line arguments into a [`ServerConfig`].
///
/// The first item is the program name, as with [`std::env::args_os`].
pub fn load_config<I, T>(args: I) -> Result<ServerConfig, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map(ServerConfig::from)
}

/// Parse a Go-style duration such as `1s`, `250ms`, `1m30s` or `1.5h`.
///
/// Accepted units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. A bare `0`
/// is the only unitless value allowed. Negative durations clamp to zero.
pub fn parse_duration(input: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidDuration {
        input: input.to_string(),
        reason,
    };

    let s = input.trim();
    if s.is_empty() {
        return Err(invalid("empty value".into()));
    }
    let (negative, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    if s.is_empty() {
        return Err(invalid("missing number after sign".into()));
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }

    let mut total: u128 = 0;
    let mut rest = s;
    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_end);
        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);

        let scale: u128 = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60 * 1_000_000_000,
            "h" => 3_600 * 1_000_000_000,
            "" => return Err(invalid(format!("missing unit after {number:?}"))),
            other => return Err(invalid(format!("unknown unit {other:?}"))),
        };

        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        if (whole.is_empty() && fraction.is_empty()) || fraction.contains('.') {
            return Err(invalid(format!("malformed number {number:?}")));
        }

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| invalid(format!("number {whole:?} out of range")))?
        };

        // Digits past nanosecond precision of the largest unit carry no weight.
        let fraction = &fraction[..fraction.len().min(18)];
        let fraction_nanos = if fraction.is_empty() {
            0
        } else {
            let digits: u128 = fraction
                .parse()
                .map_err(|_| invalid(format!("malformed fraction {fraction:?}")))?;
            digits * scale / 10u128.pow(fraction.len() as u32)
        };

        total = whole
            .checked_mul(scale)
            .and_then(|n| n.checked_add(fraction_nanos))
            .and_then(|n| total.checked_add(n))
            .ok_or_else(|| invalid("duration out of range".into()))?;
        rest = tail;
    }

    if negative {
        return Ok(Duration::ZERO);
    }
    let secs = u64::try_from(total / 1_000_000_000)
        .map_err(|_| invalid("duration out of range".into()))?;
    Ok(Duration::new(secs, (total % 1_000_000_000) as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_schema() {
        let config = load_config(["diag-server"]).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn short_and_long_port_flags() {
        let config = load_config(["diag-server", "-s", "8000", "-c", "8001", "-l", "8002"]).unwrap();
        assert_eq!(config.server_port, 8000);
        assert_eq!(config.health_port, 8001);
        assert_eq!(config.liveness_port, 8002);

        let config = load_config([
            "diag-server",
            "--server-port=7000",
            "--health-port",
            "7001",
            "--liveness-port",
            "7002",
        ])
        .unwrap();
        assert_eq!(config.server_port, 7000);
        assert_eq!(config.health_port, 7001);
        assert_eq!(config.liveness_port, 7002);
    }

    #[test]
    fn healthy_flag_forms() {
        assert!(load_config(["diag-server", "--healthy"]).unwrap().healthy);
        assert!(load_config(["diag-server", "--healthy=true"]).unwrap().healthy);
        assert!(!load_config(["diag-server", "--healthy=false"]).unwrap().healthy);
    }

    #[test]
    fn liveness_delay_and_host() {
        let config = load_config([
            "diag-server",
            "--liveness-delay",
            "1m30s",
            "--host",
            "127.0.0.1",
        ])
        .unwrap();
        assert_eq!(config.liveness_delay, Duration::from_secs(90));
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn rejects_unknown_flag() {
        let err = load_config(["diag-server", "--verbose"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(load_config(["diag-server", "-s", "70000"]).is_err());
        assert!(load_config(["diag-server", "-c", "not-a-port"]).is_err());
        assert!(load_config(["diag-server", "--healthy=maybe"]).is_err());

        let err = load_config(["diag-server", "--liveness-delay", "soon"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn parses_go_style_durations() {
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("1s").unwrap(), Duration::from_secs(1));
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_duration(".5m").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("2h45m").unwrap(), Duration::from_secs(2 * 3600 + 45 * 60));
        assert_eq!(parse_duration("10us").unwrap(), Duration::from_micros(10));
        assert_eq!(parse_duration("10µs").unwrap(), Duration::from_micros(10));
        assert_eq!(parse_duration("7ns").unwrap(), Duration::from_nanos(7));
        assert_eq!(parse_duration("+3s").unwrap(), Duration::from_secs(3));
    }

    #[test]
    fn negative_durations_clamp_to_zero() {
        assert_eq!(parse_duration("-1s").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("-1h30m").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("-0").unwrap(), Duration::ZERO);

        let config = load_config(["diag-server", "--liveness-delay", "-2s"]).unwrap();
        assert_eq!(config.liveness_delay, Duration::ZERO);
        let config = load_config(["diag-server", "--liveness-delay=-250ms"]).unwrap();
        assert_eq!(config.liveness_delay, Duration::ZERO);
    }

    #[test]
    fn rejects_invalid_durations() {
        for input in ["", "-", "+", "-5", "--1s", "5", "1x", "s", "1..2s", ".s", "1s5"] {
            assert!(parse_duration(input).is_err(), "{input:?} should be rejected");
        }
    }
}
