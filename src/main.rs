use clap::error::ErrorKind;
use clap::Parser;
use sort_export::config::USAGE;
use sort_export::utils::{logger, validation::Validate};
use sort_export::{CliConfig, CsvSortPipeline, EtlEngine, EtlError};

fn main() {
    let config = match CliConfig::try_parse() {
        Ok(config) => config,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            if !matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument | ErrorKind::UnknownArgument
            ) {
                eprintln!("{}", e);
            }
            // 參數數量錯誤：用法印到 stdout，結束碼 1
            let usage = EtlError::UsageError {
                usage: USAGE.to_string(),
            };
            println!("{}", usage.user_friendly_message());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        fail(&e);
    }

    let settings = match config.resolve() {
        Ok(settings) => settings,
        Err(e) => fail(&e),
    };

    // 第二個參數不影響輸出檔名
    if let Some(destination) = &settings.destination {
        tracing::warn!(
            "Destination argument '{}' is not used; writing {} and {}",
            destination,
            settings.by_name_file,
            settings.by_age_file
        );
    }

    let engine = EtlEngine::new(CsvSortPipeline::new(settings));

    match engine.run() {
        Ok(summary) => {
            tracing::info!(
                "Sorted {} records into {} files",
                summary.records,
                summary.written.len()
            );
            println!("Processing completed successfully.");
        }
        Err(e) => fail(&e),
    }
}

fn fail(e: &EtlError) -> ! {
    tracing::error!("Run failed: {} (Category: {:?})", e, e.category());
    tracing::error!("Suggestion: {}", e.recovery_suggestion());
    eprintln!("{}", e.user_friendly_message());
    std::process::exit(1);
}
