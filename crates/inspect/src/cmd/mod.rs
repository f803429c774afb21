//! Command-line interface for inspecting a Tapis Meta database.

use crate::{client::connect, config::Config, error::Error, report::write_report};
use clap::Parser;
use tracing::debug;

/// Show the collections of the configured Tapis Meta database and the
/// indexes of its `tapis_meta` collection.
///
/// Connection settings come from TAPIS_V3_HOST, VDJ_SERVICE_ACCOUNT,
/// VDJ_SERVICE_ACCOUNT_SECRET and MONGODB_DB.
#[derive(Parser, Debug)]
#[command(name = "tapis-meta-inspect", version, about)]
pub struct App {
    /// Extra arguments are accepted and ignored.
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub ignored: Vec<String>,
}

impl App {
    /// Parse CLI arguments, load the environment and print the report.
    pub async fn run() -> Result<(), Error> {
        let app = App::parse();
        if !app.ignored.is_empty() {
            debug!(args = ?app.ignored, "ignoring extra arguments");
        }

        let config = Config::from_env()?;
        debug!(?config, "loaded configuration");

        let client = connect(&config).await?;
        write_report(&client, &mut std::io::stdout()).await
    }
}

#[cfg(test)]
mod tests {
    use crate::cmd::App;
    use clap::{CommandFactory, Parser};

    #[test]
    fn command_is_well_formed() {
        App::command().debug_assert();
    }

    #[test]
    fn accepts_and_ignores_arguments() {
        let app = App::try_parse_from(["tapis-meta-inspect", "extra", "--verbose", "-x"])
            .expect("arguments should be accepted");
        assert_eq!(app.ignored, vec!["extra", "--verbose", "-x"]);

        let app = App::try_parse_from(["tapis-meta-inspect"]).unwrap();
        assert!(app.ignored.is_empty());
    }
}
