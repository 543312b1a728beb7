// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Command line front end for preparing outputs and computing balances.

mod cli;
mod config;
mod error;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use self::{cli::ClArgs, error::Error};

fn main() {
    dotenv::dotenv().ok();
    set_up_logging();

    std::panic::set_hook(Box::new(|p| {
        error!("{}", p);
    }));

    if let Err(e) = run(&ClArgs::parse()) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cl_args: &ClArgs) -> Result<(), Error> {
    let config = cl_args.get_config()?;
    cl_args.process_subcommand(&config)
}

fn set_up_logging() {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
