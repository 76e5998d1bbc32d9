//! # WeMo control example
//!
//! Drives a single WeMo device from the command line.
//!
//! ```bash
//! cargo run --example wemo_control -- 192.168.1.40:49153 state
//! cargo run --example wemo_control -- 192.168.1.40:49153 toggle
//! cargo run --example wemo_control -- 192.168.1.41:49153 bulb 94103EA2B27751AF dim 128
//! cargo run --example wemo_control -- 192.168.1.41:49153 status 94103EA2B27751AF 94103EA2B2782FE1
//! ```
//!
//! Set `WEMO_LOG_MODE=debug` to see the SOAP traffic.

use std::env;
use std::process::ExitCode;

use wemo_api::logging::init_logging_from_env;
use wemo_api::{BulbCommand, Device, DEFAULT_SETUP_TIMEOUT};

const USAGE: &str = "usage: wemo_control <host[:port]> <info|state|on|off|toggle|insight|bulb|status> [args...]
  bulb <id> <on|off|dim> [value] [group]
  status <id> [id...]";

fn main() -> ExitCode {
    if let Err(e) = init_logging_from_env() {
        eprintln!("logging disabled: {}", e);
    }

    let args: Vec<String> = env::args().skip(1).collect();
    let (host, command, rest) = match args.as_slice() {
        [host, command, rest @ ..] => (host, command.as_str(), rest),
        _ => {
            eprintln!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    };

    match run(&Device::new(host.as_str()), command, rest) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(device: &Device, command: &str, args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        "info" => {
            let info = device.fetch_device_info(DEFAULT_SETUP_TIMEOUT)?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        "state" => {
            let state = device.get_binary_state();
            if state.is_unknown() {
                println!("state: unknown");
            } else {
                println!("state: {}", state);
            }
        }
        "on" => device.set_state(true)?,
        "off" => device.set_state(false)?,
        "toggle" => {
            device.toggle();
            println!("state: {}", device.get_binary_state());
        }
        "insight" => {
            let params = device.get_insight_params()?;
            println!("{}", serde_json::to_string_pretty(&params)?);
        }
        "bulb" => {
            let [id, command, rest @ ..] = args else {
                return Err(USAGE.into());
            };
            let command: BulbCommand = command.parse()?;
            let value = rest.first().map(String::as_str).unwrap_or("");
            let group = rest.get(1).is_some_and(|flag| flag == "group");
            device.bulb(id, command, value, group)?;
            println!("✅ {} {}", command, id);
        }
        "status" => {
            if args.is_empty() {
                return Err(USAGE.into());
            }
            let mut status: Vec<_> = device.get_bulb_status(args)?.into_iter().collect();
            status.sort();
            for (id, value) in status {
                println!("{}: {}", id, value);
            }
        }
        other => return Err(format!("unknown command {:?}\n{}", other, USAGE).into()),
    }

    Ok(())
}
