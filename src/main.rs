use clap::Parser;
use oauth_probe::domain::ports::ConfigProvider;
use oauth_probe::utils::error::report_and_exit;
use oauth_probe::utils::{logger, validation::Validate};
use oauth_probe::{CliConfig, JobProbe, ProbeEngine, ProbeError};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting oauth-probe");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        report_and_exit(&e);
    }

    let dry_run = config.dry_run;
    let output = config.output_options();

    let probe = match JobProbe::from_config(config) {
        Ok(probe) => probe,
        Err(e) => report_and_exit(&e),
    };
    let engine = ProbeEngine::new(probe);

    if dry_run {
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
