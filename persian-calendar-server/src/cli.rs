use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;

use getopts::{Matches, Options};
use tokio::time::Duration;

use persian_calendar::HolidayTypes;

#[derive(Debug)]
pub struct Args {
    pub address: SocketAddr,
    pub source: PathBuf,
    pub default_types: HolidayTypes,
    pub enable_cache: bool,
    pub cache_ttl: Duration,
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "a",
        "address",
        "Socket address (IP and port) to listen on [Default: 127.0.0.1:8080]",
        "SOCKET_ADDRESS",
    );
    opts.optopt(
        "s",
        "source",
        "JSON file holding the Persian, Islamic and Gregorian event tables",
        "PATH",
    );
    opts.optopt(
        "d",
        "default-types",
        "Event categories used when a request names none [Default: iran_holidays]",
        "TYPES",
    );
    opts.optflag(
        "c",
        "enable-cache",
        "Enable caching of filtered event stores [Default: false]",
    );
    opts.optopt(
        "t",
        "cache-ttl",
        "Time-to-live for cached event stores [Default: 3600]",
        "SECONDS",
    );
    opts
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    process::exit(1);
}

pub fn parse(args: Vec<String>) -> Args {
    let opts = opts();

    let matches = match opts.parse(args) {
        Ok(matches) => matches,
        Err(err) => fail(&err.to_string()),
    };

    if matches.opt_present("help") {
        println!("{}", opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME"))));
        process::exit(0);
    }

    match args_from_matches(&matches) {
        Ok(args) => args,
        Err(message) => fail(&message),
    }
}

fn args_from_matches(matches: &Matches) -> Result<Args, String> {
    let address = matches
        .opt_get_default("address", SocketAddr::from(([127, 0, 0, 1], 8080)))
        .map_err(|err| format!("Provided value for option 'address' is invalid: {err}"))?;

    let source = matches
        .opt_str("source")
        .map(PathBuf::from)
        .ok_or_else(|| "Missing required option 'source'".to_string())?;

    let default_types = matches
        .opt_str("default-types")
        .map_or_else(HolidayTypes::default, HolidayTypes::parse);

    let enable_cache = matches.opt_present("enable-cache");

    let cache_ttl = matches
        .opt_get_default("cache-ttl", 3600)
        .map(Duration::from_secs)
        .map_err(|err| format!("Provided value for option 'cache-ttl' is invalid: {err}"))?;

    Ok(Args {
        address,
        source,
        default_types,
        enable_cache,
        cache_ttl,
    })
}
