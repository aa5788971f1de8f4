use clap::Parser;
use std::{env, io};

use replacer::cli::{Args, BIN_NAME, normalize_legacy_flags, run};
use replacer_core::{
    config::{load_config, set_config_dir_override},
    logging::setup_logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse_from(normalize_legacy_flags(env::args()));
    if let Some(config_dir) = &args.config_dir {
        set_config_dir_override(config_dir);
    }
    setup_logging(BIN_NAME, args.log_level)?;
    let config = load_config()?;

    run(&args, &config, &mut io::stdout()).await
}
