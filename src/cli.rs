use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;

use getopts::Options;

const ADDRESS_VAR: &str = "CALENDAR_ADDR";

#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Serve,
    PrintConfig,
    EmitStyle(PathBuf),
}

#[derive(Debug, PartialEq, Eq)]
pub struct Args {
    pub address: SocketAddr,
    pub assets: Option<PathBuf>,
    pub action: Action,
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
        "Socket address (IP and port) to listen on [Default: $CALENDAR_ADDR or 127.0.0.1:8080]",
        "SOCKET_ADDRESS",
    );
    opts.optopt(
        "",
        "assets",
        "Directory served under /assets, holding the compiled stylesheet",
        "DIR",
    );
    opts.optopt(
        "",
        "emit-style",
        "Write the CSS build configuration (tailwind.config.js) to PATH and exit",
        "PATH",
    );
    opts.optflag(
        "",
        "print-config",
        "Print the calendar widget options as JSON and exit",
    );
    opts
}

pub fn parse(args: Vec<String>) -> Args {
    let opts = opts();

    match parse_with(&opts, args, env::var(ADDRESS_VAR).ok()) {
        Ok(Some(args)) => args,
        Ok(None) => {
            println!("{}", opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME"))));
            process::exit(0);
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

/// Returns `Ok(None)` when help was requested.
fn parse_with(
    opts: &Options,
    args: Vec<String>,
    default_address: Option<String>,
) -> Result<Option<Args>, String> {
    let matches = opts.parse(args).map_err(|fail| fail.to_string())?;

    if matches.opt_present("help") {
        return Ok(None);
    }

    let address: SocketAddr = match matches.opt_str("address").or(default_address) {
        Some(raw) => raw
            .parse()
            .map_err(|err| format!("Provided value for option 'address' is invalid: {err}"))?,
        None => SocketAddr::from(([127, 0, 0, 1], 8080)),
    };

    let assets = matches.opt_str("assets").map(PathBuf::from);

    let action = match (
        matches.opt_str("emit-style"),
        matches.opt_present("print-config"),
    ) {
        (Some(_), true) => {
            return Err("Options 'emit-style' and 'print-config' are mutually exclusive".into())
        }
        (Some(path), false) => Action::EmitStyle(PathBuf::from(path)),
        (None, true) => Action::PrintConfig,
        (None, false) => Action::Serve,
    };

    Ok(Some(Args {
        address,
        assets,
        action,
    }))
}
