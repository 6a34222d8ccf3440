use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use journey_gen::colour::{ColourCache, ColourResolver, ConsolePrompt};
use journey_gen::config::JourneyConfig;
use journey_gen::gateway::{ApiClient, BusGateway, CachedGateway, TrainGateway, WalkGateway};
use journey_gen::plan::{JourneyBuilder, Plan};
use journey_gen::render::write_output;
use journey_gen::webdriver::{MapsConfig, MapsRouteLookup};

/// Build a journey page from a plan of bus, train and walking legs.
#[derive(Parser, Debug)]
#[command(name = "journey-gen", version)]
struct Args {
    /// YAML plan listing the journeys and their legs
    plan: PathBuf,

    /// Directory to write index.html and styles.css into
    output: PathBuf,

    /// Replace the output directory if it already exists
    #[arg(long)]
    overwrite: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "journey generation failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = JourneyConfig::from_env()?;
    let plan = Plan::load(&args.plan)?;

    let trip_cache = config.trip_cache();
    let client = ApiClient::new(config.api())?;
    let trains = CachedGateway::new(TrainGateway::new(client.clone()), &trip_cache);
    let buses = CachedGateway::new(BusGateway::new(client), &trip_cache);
    let walks = WalkGateway::new(config.walk())?;
    if config.ors_key.is_none() {
        warn!("ORS_KEY is not set; walking legs will fail");
    }

    // Without a browser every colour lookup falls through to the prompt.
    let lookup = match MapsRouteLookup::connect(&config.webdriver(), MapsConfig::default()).await {
        Ok(lookup) => Some(lookup),
        Err(e) => {
            warn!(error = %e, url = %config.webdriver_url, "no browser session; colours will be asked for");
            None
        }
    };

    let resolver_config = config.resolver();
    let prompt = ConsolePrompt::stdio(resolver_config.fallback);
    let resolver = ColourResolver::new(ColourCache::new(&config.colour_cache_dir), lookup, prompt)
        .with_config(resolver_config);

    let mut builder = JourneyBuilder::new(trains, buses, walks, resolver)
        .with_walk_colours(config.walk_colours);
    let built = builder.build(&plan).await;

    if let Some(session) = builder.into_resolver().into_lookup() {
        if let Err(e) = session.close().await {
            warn!(error = %e, "failed to close browser session");
        }
    }

    let journeys = built?;
    let index = write_output(&journeys, &args.output, args.overwrite)?;
    info!(path = %index.display(), "done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    fn args(list: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("journey-gen").chain(list.iter().copied()))
    }

    #[test]
    fn parses_paths_and_flag() {
        let parsed = args(&["plan.yaml", "site", "--overwrite"]).unwrap();
        assert_eq!(parsed.plan, PathBuf::from("plan.yaml"));
        assert_eq!(parsed.output, PathBuf::from("site"));
        assert!(parsed.overwrite);

        assert!(!args(&["plan.yaml", "site"]).unwrap().overwrite);
        assert!(args(&["--overwrite", "plan.yaml", "site"]).unwrap().overwrite);
    }

    #[test]
    fn rejects_bad_usage() {
        assert_eq!(
            args(&["plan.yaml"]).unwrap_err().kind(),
            ErrorKind::MissingRequiredArgument
        );
        assert!(args(&["a", "b", "c"]).is_err());
        assert_eq!(
            args(&["plan.yaml", "site", "--force"]).unwrap_err().kind(),
            ErrorKind::UnknownArgument
        );
    }

    #[test]
    fn help_is_a_display_request() {
        assert_eq!(args(&["--help"]).unwrap_err().kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn argument_definitions_are_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
