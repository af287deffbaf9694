//! # Serial Subcommand

use anyhow::Result;
use clap::Args;

/// Arguments for the serial subcommand.
#[derive(Args, Debug)]
pub struct SerialArgs {
    /// How many serial numbers to print.
    #[arg(long, short = 'n', default_value_t = 1)]
    pub count: usize,
}

/// Print `count` generated serial numbers, one per line.
pub fn run_serial(args: &SerialArgs) -> Result<u8> {
    for serial in generate(args.count) {
        println!("{serial}");
    }
    Ok(0)
}

fn generate(count: usize) -> Vec<String> {
    (0..count).map(|_| wpc_core::serial::generate()).collect()
}
