use anyhow::Context;
use clap::Parser;
use speaker_scraper::utils::{logger, validation::Validate};
use speaker_scraper::{
    AppSettings, CliArgs, GoogleSheetsClient, LocalStorage, ScrapeEngine, ScrapeError,
    SiteProfile, SpeakerPipeline,
};

fn fail(e: &ScrapeError) -> ! {
    tracing::error!(
        "❌ Speaker scrape failed: {} (Category: {:?})",
        e,
        e.category()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `.env` 不存在不算錯誤，格式錯誤才是
    match dotenvy::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e).context("Failed to load .env file"),
    }

    let args = CliArgs::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting speaker-scraper");
    tracing::debug!("CLI args: {:?}", args);

    let profile = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading site profile from: {}", path.display());
            SiteProfile::from_file(path).unwrap_or_else(|e| fail(&e))
        }
        None => SiteProfile::default(),
    };
    if let Err(e) = profile.validate() {
        fail(&e);
    }

    // 試算表輸出需要的設定要在抓網頁之前先確認
    let settings = AppSettings::from_env();
    let sheets = if args.file.is_sheet() {
        Some(settings.require_sheets().unwrap_or_else(|e| fail(&e)))
    } else {
        None
    };

    let storage = LocalStorage::current_dir();
    let mut pipeline =
        SpeakerPipeline::from_profile(&profile, storage, args.file.clone())
            .unwrap_or_else(|e| fail(&e))
            .with_policy(args.extraction_policy());
    if let Some(sheets) = sheets {
        pipeline = pipeline.with_sheets(GoogleSheetsClient::new(&sheets), sheets.sharing_email);
    }

    let engine = ScrapeEngine::new(pipeline);
    match engine.run().await {
        Ok(summary) => {
            tracing::info!("✅ Scrape completed successfully!");
            println!("✅ Saved {} speakers", summary.records);
            println!("📁 {}", summary.location);
        }
        Err(e) => fail(&e),
    }

    Ok(())
}
