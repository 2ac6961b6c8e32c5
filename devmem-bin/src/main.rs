//! `devmem3`: read and write any location in physical memory.
//!
//! ```text
//! devmem3 r { address } [ type [ count ] ]
//! devmem3 w { address } { type } { data } [ count ]
//! ```
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use devmem_core::util::DEV_MEM;
use devmem_core::{MemoryPoker, PokeError, PokeRequest};
use log::debug;

/// CLI arguments for the `devmem3` binary.
///
/// The positional arguments follow the classic devmem grammar and are interpreted by
/// [`PokeRequest::parse`]; clap only collects them.
#[derive(Debug, Parser)]
#[clap(name = "devmem3", version)]
struct CliArgs {
    /// The physical memory device to map.
    #[clap(long = "device", short = 'd', default_value = DEV_MEM)]
    device: PathBuf,
    /// Access mode: [r]ead or [w]rite.
    mode: String,
    /// Memory address to act upon (hex).
    address: String,
    /// Access operation type: [b]yte, [h]alfword, [l]ong (default).
    access_type: Option<String>,
    /// Read mode: count of accesses. Write mode: data to be written (hex), then count.
    operands: Vec<String>,
}

impl CliArgs {
    /// Positional arguments in command line order.
    fn positional(&self) -> Vec<&str> {
        [self.mode.as_str(), self.address.as_str()]
            .into_iter()
            .chain(self.access_type.as_deref())
            .chain(self.operands.iter().map(String::as_str))
            .collect()
    }
}

fn print_usage() {
    let name = std::env::args().next().unwrap_or_else(|| "devmem3".into());
    eprintln!(
        "\nUsage:\t{name} r {{ address }} [ type [ count ] ]\n\
         \t{name} w {{ address }} {{ type }} {{ data }} [ count ]\n\
         \taddress : memory address to act upon\n\
         \ttype    : access operation type : [b]yte, [h]alfword, [l]ong (default)\n\
         \tdata    : data to be written\n\n\
         \tcount   : count of accesses\n"
    );
}

fn run(args: &CliArgs) -> Result<(), PokeError> {
    let request = PokeRequest::parse(&args.positional())?;
    debug!("Request: {:?}", request);
    let mut out = io::stdout().lock();
    MemoryPoker::new(&args.device).run(&request, &mut out)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            debug!("{}", e);
            print_usage();
            return ExitCode::from(1);
        }
    };
    debug!("CLI args: {:?}", args);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            if let PokeError::Usage(_) = e {
                print_usage();
            }
            ExitCode::from(e.exit_code())
        }
    }
}
