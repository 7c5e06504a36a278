use std::{env, process};

use anyhow::Context;
use log::info;
use serde_json::{Map, Value};

use phishing_sentinel::{extract, ArtifactConfig};

const DEFAULT_MODEL_DIR: &str = "models";

fn usage(bin: &str) -> ! {
    eprintln!("Usage: {bin} <url>...\n       {bin} features <url>");
    process::exit(2);
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let bin = args.first().map_or("sentinel", String::as_str);

    match args.get(1).map(String::as_str) {
        None => usage(bin),
        Some("features") => {
            let Some(url) = args.get(2) else {
                usage(bin);
            };

            let features: Map<String, Value> = extract(url)
                .named()
                .map(|(name, value)| (name.to_string(), Value::from(value)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&features)?);
        }
        Some(_) => {
            let model_dir =
                env::var("SENTINEL_MODEL_DIR").unwrap_or_else(|_| DEFAULT_MODEL_DIR.to_string());
            let config = ArtifactConfig::new(&model_dir);

            phishing_sentinel::load_assets(&config)
                .with_context(|| format!("loading model assets from '{model_dir}'"))?;
            info!("scoring {} url(s)", args.len() - 1);

            let urls = &args[1..];
            let results = phishing_sentinel::global().classify_batch(urls)?;
            for result in results {
                println!("{}", serde_json::to_string(&result)?);
            }
        }
    }

    Ok(())
}
