#![forbid(unsafe_code)]

extern crate clap;
extern crate darksky_codec;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate thiserror;
extern crate time;

mod config;
#[macro_use]
mod timed;

use crate::config::{Config, ConfigError};

use darksky_codec::blob::{read_blob, write_blob};
use darksky_codec::{BlobError, DecodeError, EncodeError, Response};

use clap::{Arg, ArgAction, ArgMatches, Command};
use env_logger::Env;
use thiserror::Error;
use time::format_description::well_known::Rfc3339;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{path}: {err}")]
    Io {
        path: String,
        #[source]
        err: io::Error,
    },
    #[error("{path}: {err}")]
    Decode {
        path: String,
        #[source]
        err: DecodeError,
    },
    #[error("{path}: {err}")]
    Blob {
        path: String,
        #[source]
        err: BlobError,
    },
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

fn main() -> ExitCode {
    let env = Env::default().filter_or("MY_LOG_LEVEL", "info");
    env_logger::init_from_env(env);

    let file_arg = |name: &'static str| {
        Arg::new(name)
            .required(true)
            .value_parser(clap::value_parser!(PathBuf))
    };
    let pretty_arg = || {
        Arg::new("pretty")
            .short('p')
            .long("pretty")
            .action(ArgAction::SetTrue)
    };

    let matches = Command::new("darksky-codec")
        .version("0.1")
        .author("Chris Lieb")
        .about("Validate and convert Dark Sky forecast responses")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("check")
                .about("Decode each file and summarize its contents")
                .arg(file_arg("files").num_args(1..)),
        )
        .subcommand(
            Command::new("normalize")
                .about("Decode a file and write it back out in wire form")
                .arg(file_arg("file"))
                .arg(pretty_arg()),
        )
        .subcommand(
            Command::new("pack")
                .about("Convert a JSON response into a compressed MessagePack blob")
                .arg(file_arg("input"))
                .arg(file_arg("output")),
        )
        .subcommand(
            Command::new("unpack")
                .about("Convert a compressed MessagePack blob back into JSON")
                .arg(file_arg("input"))
                .arg(pretty_arg()),
        )
        .get_matches();

    match run(&matches) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &ArgMatches) -> Result<bool, CliError> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    debug!("Using {config:?}");

    match matches.subcommand() {
        Some(("check", sub)) => {
            let files: Vec<&PathBuf> = sub.get_many::<PathBuf>("files").unwrap().collect();
            Ok(timed!(check(&files), "Checking {} files", files.len()))
        }
        Some(("normalize", sub)) => {
            let file = sub.get_one::<PathBuf>("file").unwrap();
            let response = timed!(read_response(file), "Decoding {}", file.display())?;
            let pretty = config.pretty || sub.get_flag("pretty");
            darksky_codec::encode_response_writer(&response, io::stdout().lock(), pretty)?;
            Ok(true)
        }
        Some(("pack", sub)) => {
            let input = sub.get_one::<PathBuf>("input").unwrap();
            let output = sub.get_one::<PathBuf>("output").unwrap();
            let response = read_response(input)?;
            let blob = timed!(
                write_blob(&response, config.compression_level),
                "Packing {} at level {}",
                input.display(),
                config.compression_level
            )
            .map_err(|err| CliError::Blob {
                path: output.display().to_string(),
                err,
            })?;
            fs::write(output, &blob).map_err(|err| CliError::Io {
                path: output.display().to_string(),
                err,
            })?;
            info!("Wrote {} bytes to {}", blob.len(), output.display());
            Ok(true)
        }
        Some(("unpack", sub)) => {
            let input = sub.get_one::<PathBuf>("input").unwrap();
            let raw = read_file(input)?;
            let unpacked = timed!(read_blob::<Response>(&raw), "Unpacking {}", input.display());
            let response = unpacked.map_err(|err| CliError::Blob {
                path: input.display().to_string(),
                err,
            })?;
            let pretty = config.pretty || sub.get_flag("pretty");
            darksky_codec::encode_response_writer(&response, io::stdout().lock(), pretty)?;
            Ok(true)
        }
        _ => unreachable!("clap requires a subcommand"),
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, CliError> {
    fs::read(path).map_err(|err| CliError::Io {
        path: path.display().to_string(),
        err,
    })
}

fn read_response(path: &Path) -> Result<Response, CliError> {
    let raw = read_file(path)?;
    darksky_codec::decode_response(&raw).map_err(|err| CliError::Decode {
        path: path.display().to_string(),
        err,
    })
}

/// Decode every file, logging a summary or the reason it was rejected. Returns whether all files
/// decoded.
fn check(files: &[&PathBuf]) -> bool {
    let mut ok = true;
    for file in files {
        match read_response(file) {
            Ok(response) => info!("{}: {}", file.display(), describe(&response)),
            Err(err) => {
                error!("{err}");
                ok = false;
            }
        }
    }
    ok
}

fn describe(response: &Response) -> String {
    let mut parts = vec![format!(
        "({}, {}) in {}",
        response.latitude, response.longitude, response.timezone
    )];
    if let Some(currently) = &response.currently {
        let at = currently
            .time
            .format(&Rfc3339)
            .unwrap_or_else(|_| currently.time.to_string());
        parts.push(format!("currently at {at}"));
    }
    for (name, block) in response.blocks() {
        parts.push(format!("{} {} points", block.len(), name));
    }
    if let Some(alerts) = &response.alerts {
        parts.push(format!("{} alerts", alerts.len()));
    }
    if let Some(flags) = &response.flags {
        parts.push(format!("{} units", flags.units));
        if flags.dark_sky_unavailable == Some(true) {
            warn!("Dark Sky data was unavailable for {}", response.timezone);
        }
    }
    parts.join(", ")
}
