use clap::Parser;
use oauth_probe::domain::ports::ConfigProvider;
use oauth_probe::utils::error::report_and_exit;
use oauth_probe::utils::{logger, validation::Validate};
use oauth_probe::{JobProbe, ProbeEngine, ProbeError, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-probe")]
#[command(about = "Send one OAuth 1.0a signed request described by a TOML file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "probe.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Override the pretty-print setting from config
    #[arg(long)]
    pretty: Option<bool>,

    /// Print the signed request without sending it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load config file '{}'", args.config);
            report_and_exit(&e);
        }
    };

    // 套用命令列覆蓋設定
    if let Some(pretty) = args.pretty {
        let mut output = config.output.unwrap_or_default();
        output.pretty = pretty;
        config.output = Some(output);
        tracing::info!("🔧 Pretty output overridden to: {}", pretty);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        report_and_exit(&e);
    }

    let output = config.output_options();
    let engine = match JobProbe::from_config(config) {
        Ok(probe) => ProbeEngine::new(probe),
        Err(e) => report_and_exit(&e),
    };

    if args.dry_run {
        match engine.dry_run().await {
            Ok(request) => println!("{}", request.describe()),
            Err(e) => report_and_exit(&e),
        }
        return;
    }

    let response = match engine.run().await {
        Ok(response) => response,
        Err(e) => report_and_exit(&e),
    };
    if let Err(e) = response.write_to(output, &mut std::io::stdout().lock()) {
        report_and_exit(&ProbeError::from(e));
    }
}
