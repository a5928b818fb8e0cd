use clap::Parser;
use log::debug;
use pet_weather::{run_app, Args, Config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("pet_weather=info")).init();
    debug!("Debug on");

    let config = Config::load(Args::parse());
    run_app(config)
}
