use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use whoiswatch_core::config::{DEFAULT_AGE_CRITICAL, DEFAULT_AGE_WARNING};
use whoiswatch_core::output::{get_formatter, OutputFormat};
use whoiswatch_core::plugin::CheckResult;
use whoiswatch_core::{Config, ExpirationCheck, LogLevel, ServiceState};

#[derive(Parser)]
#[command(name = "check_whois")]
#[command(about = "Nagios plugin used to monitor expiration of WHOIS records")]
#[command(version)]
struct Cli {
    /// The name of the domain whose WHOIS records will be evaluated
    #[arg(short, long)]
    domain: String,

    /// Days remaining before domain expiration when a WARNING state is triggered
    #[arg(short = 'w', long, default_value_t = DEFAULT_AGE_WARNING)]
    age_warning: u32,

    /// Days remaining before domain expiration when a CRITICAL state is triggered
    #[arg(short = 'c', long, default_value_t = DEFAULT_AGE_CRITICAL)]
    age_critical: u32,

    /// Log level: disabled, error, warn, info, debug or trace (RUST_LOG takes precedence)
    #[arg(long = "log-level", visible_alias = "ll", default_value = "info")]
    log_level: String,

    /// Append application details to the plugin output
    #[arg(long)]
    branding: bool,

    /// WHOIS server to query instead of the TLD's registry server
    #[arg(short, long)]
    server: Option<String>,

    /// Do not follow referrals to the registrar's WHOIS server
    #[arg(long)]
    disable_referral: bool,

    /// Network timeout in seconds for each WHOIS operation
    #[arg(short, long, default_value_t = 10)]
    timeout: u64,

    /// Output format (nagios or json)
    #[arg(short, long, default_value = "nagios")]
    format: String,
}

fn build_config(cli: Cli) -> anyhow::Result<(Config, OutputFormat)> {
    let format: OutputFormat = cli
        .format
        .parse()
        .map_err(anyhow::Error::msg)
        .context("invalid output format")?;

    let log_level: LogLevel = cli.log_level.parse()?;

    let config = Config {
        domain: cli.domain,
        age_warning: cli.age_warning,
        age_critical: cli.age_critical,
        log_level,
        emit_branding: cli.branding,
        registrar_server: cli.server,
        disable_referral: cli.disable_referral,
        timeout: Duration::from_secs(cli.timeout),
    };
    config.validate().context("invalid configuration")?;

    Ok((config, format))
}

fn init_tracing(level: LogLevel) {
    // stdout is reserved for plugin output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn unknown_output(format: OutputFormat, domain: &str, message: &str, error: &anyhow::Error) -> String {
    let result = CheckResult::unknown(domain, message, format!("{:#}", error));
    get_formatter(format).format_check(&result)
}

fn exit_unknown(format: OutputFormat, domain: &str, message: &str, error: &anyhow::Error) -> ! {
    print!("{}", unknown_output(format, domain, message, error));
    std::process::exit(ServiceState::Unknown.exit_code());
}

#[tokio::main]
async fn main() {
    // clap's own exit code 2 would read as CRITICAL to the supervisor
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => exit_unknown(
            OutputFormat::default(),
            "",
            "Error initializing application",
            &anyhow::Error::new(e),
        ),
    };

    // Honor --format even when the rest of the configuration is rejected
    let requested_format = cli.format.parse().unwrap_or_default();
    let domain = cli.domain.clone();

    let (config, format) = match build_config(cli) {
        Ok(parsed) => parsed,
        Err(e) => exit_unknown(requested_format, &domain, "Error initializing application", &e),
    };

    init_tracing(config.log_level);
    debug!(
        domain = %config.domain,
        warning_days = config.age_warning,
        critical_days = config.age_critical,
        "Starting WHOIS expiration check"
    );

    let now = chrono::Utc::now();
    let result: CheckResult = ExpirationCheck::new(config).run(now).await;

    print!("{}", get_formatter(format).format_check(&result));
    std::process::exit(result.exit_code());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["check_whois", "--domain", "example.com"]).unwrap();
        let (config, format) = build_config(cli).unwrap();

        assert_eq!(config.domain, "example.com");
        assert_eq!(config.age_warning, 30);
        assert_eq!(config.age_critical, 15);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(!config.emit_branding);
        assert_eq!(format, OutputFormat::Nagios);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::try_parse_from([
            "check_whois", "-d", "example.org", "-w", "60", "-c", "20", "-s", "whois.pir.org",
            "--ll", "debug", "--disable-referral", "--format", "json",
        ])
        .unwrap();
        let (config, format) = build_config(cli).unwrap();

        assert_eq!(config.age_warning, 60);
        assert_eq!(config.age_critical, 20);
        assert_eq!(config.registrar_server.as_deref(), Some("whois.pir.org"));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(config.disable_referral);
        assert_eq!(format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_rejects_inverted_thresholds() {
        let cli = Cli::try_parse_from(["check_whois", "-d", "example.com", "-w", "10", "-c", "20"])
            .unwrap();
        let err = build_config(cli).unwrap_err();

        assert!(format!("{:#}", err).contains("critical threshold set higher"));
    }

    #[test]
    fn test_invalid_config_is_reported_in_requested_format() {
        let cli = Cli::try_parse_from([
            "check_whois", "-d", "example.com", "-w", "10", "-c", "20", "--format", "json",
        ])
        .unwrap();
        let err = build_config(cli).unwrap_err();

        let json = unknown_output(OutputFormat::Json, "example.com", "Error initializing application", &err);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["state"], "UNKNOWN");
        assert_eq!(value["domain"], "example.com");
        assert!(value["errors"][0]
            .as_str()
            .unwrap()
            .contains("critical threshold set higher"));

        let text = unknown_output(OutputFormat::Nagios, "example.com", "Error initializing application", &err);
        assert!(text.starts_with("UNKNOWN: Error initializing application \n \n**ERRORS** \n \n* "));
        assert!(text.ends_with(" \n"));
    }

    #[test]
    fn test_cli_rejects_negative_days() {
        assert!(Cli::try_parse_from(["check_whois", "-d", "example.com", "-w", "-5"]).is_err());
    }
}
