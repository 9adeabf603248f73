#![allow(unused_crate_dependencies)]
//! Binary entrypoint for the Lucien editor.

use clap::Parser;
use lucien_frontend_iced::{Cli, launch};

fn main() -> anyhow::Result<()> {
	launch(Cli::parse())
}
