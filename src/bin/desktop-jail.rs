// SPDX-License-Identifier: MIT

use log::error;
use serde::Serialize;
use structopt::StructOpt;

use desktop_jail::{GlobalData, GlobalDataOptions, PlatformResources};

/// Command line arguments of the program
#[derive(Debug, Clone, StructOpt)]
#[structopt(
    name = "desktop-jail",
    about = "Check that the isolated desktop and LoadLibraryW addresses can be set up",
    setting = structopt::clap::AppSettings::ColoredHelp)
]
struct Args {
    /// Create the isolated desktop before querying
    #[structopt(long, short)]
    desktop: bool,

    /// Resolve both LoadLibraryW addresses before querying
    #[structopt(long, short)]
    load_library: bool,

    /// output in JSON format
    #[structopt(long, short)]
    json: bool,
}

/// Outcome of one accessor, as printed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum Outcome<T> {
    Ok(T),
    Error(String),
}

impl<T> From<desktop_jail::platform::error::Result<T>> for Outcome<T> {
    fn from(r: desktop_jail::platform::error::Result<T>) -> Self {
        match r {
            Ok(v) => Outcome::Ok(v),
            Err(e) => Outcome::Error(e.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct Report {
    desktop_name: Outcome<String>,
    load_library_64: Outcome<usize>,
    load_library_32: Outcome<usize>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::from_args();
    let options = GlobalDataOptions {
        need_desktop: args.desktop,
        need_load_library: args.load_library,
    };

    let data = match GlobalData::create(options) {
        Ok(d) => d,
        Err(e) => {
            error!("could not set up global data: {}", e);
            std::process::exit(1);
        }
    };

    let report = Report {
        desktop_name: data.desktop_name().into(),
        load_library_64: data.load_library_address_64().into(),
        load_library_32: data.load_library_address_32().into(),
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                error!("could not encode the report: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print_text("desktop", &report.desktop_name, |s| s.clone());
        print_text("LoadLibraryW (64-bit)", &report.load_library_64, |a| format!("{:#x}", a));
        print_text("LoadLibraryW (32-bit)", &report.load_library_32, |a| format!("{:#x}", a));
    }
}

fn print_text<T>(label: &str, outcome: &Outcome<T>, show: impl Fn(&T) -> String) {
    match outcome {
        Outcome::Ok(v) => println!("{}: {}", label, show(v)),
        Outcome::Error(e) => println!("{}: error: {}", label, e),
    }
}
