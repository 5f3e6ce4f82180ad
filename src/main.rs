use clap::Parser;
use psa_reporting::app::commands;
use psa_reporting::utils::{logger, validation::Validate};
use psa_reporting::{CliConfig, Reporting, ReportingConfig, ReportingError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::debug!("CLI args: {:?}", cli);

    let config = match ReportingConfig::from_file(&cli.config).and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration error in {}: {}", cli.config, e);
            eprintln!("❌ {}", e);
            std::process::exit(exit_code(&e));
        }
    };

    let reporting = Reporting::connect(&config)?;

    match commands::execute(&reporting, &cli.command).await {
        Ok(records) => {
            let output = if cli.compact {
                serde_json::to_string(&records)?
            } else {
                serde_json::to_string_pretty(&records)?
            };
            println!("{}", output);
        }
        Err(e) => {
            tracing::error!("❌ Request failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(exit_code(&e));
        }
    }

    Ok(())
}

/// 1 = 參數或配置錯誤，2 = 遠端 API 錯誤
fn exit_code(error: &ReportingError) -> i32 {
    match error {
        ReportingError::ApiError { .. } => 2,
        _ => 1,
    }
}
