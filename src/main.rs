use std::env;

use anyhow::{Context, Result};
use log::info;

use calendar_widget::{StyleBuildConfig, WidgetConfig};

mod cli;
mod page;
mod server;

const DEFAULT_LOG: &str = "calendar_bootstrap=info,calendar_widget=info";

fn setup_logging() {
    if env::var("LOG").is_err() {
        env::set_var("LOG", DEFAULT_LOG);
    }

    pretty_env_logger::init_custom_env("LOG");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::parse(env::args().skip(1).collect());

    setup_logging();

    match args.action {
        cli::Action::Serve => server::serve(args.address, args.assets.as_deref()).await,

        cli::Action::PrintConfig => {
            let config = WidgetConfig::default();
            config.validate()?;
            println!("{}", config.to_json()?);
            Ok(())
        }

        cli::Action::EmitStyle(path) => {
            let style = StyleBuildConfig::default();
            style.validate()?;
            tokio::fs::write(&path, style.to_module()?)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote style build configuration to {}", path.display());
            Ok(())
        }
    }
}
