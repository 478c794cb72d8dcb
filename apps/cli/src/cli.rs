use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;

use dealerbid_vehicle_data::{
    BackendVinDecoder, CarApiProvider, NhtsaProvider, VehicleDataService,
};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "vehicle-lookup",
    about = "Decode VINs and resolve vehicle trims and specs",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Decode a 17-character VIN
    Decode { vin: String },
    /// List the trims of a year/make/model
    Trims {
        year: String,
        make: String,
        model: String,
    },
    /// Resolve engine, transmission, drivetrain and body style of a trim
    Specs {
        year: String,
        make: String,
        model: String,
        trim: String,
        /// Also print which source produced each field
        #[arg(long)]
        explain: bool,
    },
}

pub(crate) fn build_service(config: &Config) -> VehicleDataService {
    let mut service = VehicleDataService::new(config.resolver.clone())
        .with_structured_source(Arc::new(CarApiProvider::new(
            config.structured_api_url.clone(),
            config.structured_api_token.clone(),
            config.request_timeout,
        )))
        .with_pattern_source(Arc::new(NhtsaProvider::new(
            config.pattern_api_url.clone(),
            config.request_timeout,
        )));

    if let Some(url) = &config.decode_url {
        service = service.with_backend(Arc::new(BackendVinDecoder::new(
            url.clone(),
            config.request_timeout,
        )));
    }
    service
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) async fn run(cli: Cli, config: &Config) -> anyhow::Result<()> {
    let service = build_service(config);

    match cli.command {
        Command::Decode { vin } => print_json(&service.decode_vin(&vin).await),
        Command::Trims { year, make, model } => print_json(
            &service
                .fetch_trims_by_year_make_model(&year, &make, &model)
                .await,
        ),
        Command::Specs {
            year,
            make,
            model,
            trim,
            explain,
        } => {
            let resolved = service
                .fetch_resolved_specs(&year, &make, &model, &trim)
                .await;
            if explain {
                print_json(&resolved)
            } else {
                print_json(&resolved.specs)
            }
        }
    }
}
