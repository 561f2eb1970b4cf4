use clap::Parser;
use lmis_upload::utils::error::ErrorSeverity;
use lmis_upload::utils::{logger, validation::Validate};
use lmis_upload::{
    normalize_date, CliConfig, Command, ConverterRegistry, CsvSource, FacilityLookupClient,
    Record, RestCommunicationClient, UniqueLookup, UploadConfig,
};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting lmis-upload CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    match run(config.command).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!(
                "Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}

/// Runs one subcommand, returning the process exit code.
async fn run(command: Command) -> lmis_upload::Result<i32> {
    match command {
        Command::NormalizeDate { value } => match normalize_date(&value) {
            Some(date) => {
                println!("{}", date);
                Ok(0)
            }
            None => {
                eprintln!("No accepted date format matches '{}'", value);
                Ok(2)
            }
        },
        Command::Convert { config, input } => {
            let upload_config = UploadConfig::from_file(&config)?;
            upload_config.validate()?;

            let registry = ConverterRegistry::with_defaults();
            let records = CsvSource::new(input).read_records()?;
            tracing::info!("Converting {} records", records.len());

            for record in &records {
                let document = registry.convert_record(record, upload_config.mappings())?;
                println!("{}", serde_json::to_string(&document.build())?);
            }
            Ok(0)
        }
        Command::FindFacility { config, code } => {
            let upload_config = UploadConfig::from_file(&config)?;
            upload_config.validate()?;

            let client = RestCommunicationClient::new(upload_config.require_api()?)?;
            let lookup = FacilityLookupClient::new(client);
            let record = Record::new().with_field("code", code.clone());

            match lookup.find_unique(&record).await? {
                Some(facility) => {
                    println!("{}", serde_json::to_string_pretty(&facility)?);
                    Ok(0)
                }
                None => {
                    tracing::info!("No facility with code {}", code);
                    println!("No facility with code {}", code);
                    Ok(1)
                }
            }
        }
    }
}
