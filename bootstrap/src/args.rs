use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CommonArgs {
    /// JSON file holding the role buttons of every guild
    #[arg(long, env = "ROLE_BUTTONS_FILE", default_value = "roles.json")]
    pub role_buttons_file: PathBuf,
    #[arg(long, env = "SENTRY_DSN")]
    pub sentry_dsn: Option<String>,
    #[arg(long, env = "SENTRY_ENVIRONMENT")]
    pub sentry_environment: Option<String>,
    #[arg(long, env = "SENTRY_SAMPLE_RATE")]
    pub sentry_sample_rate: Option<f32>,
    #[arg(long, env = "SENTRY_TRACES_SAMPLE_RATE")]
    pub sentry_traces_sample_rate: Option<f32>,
}
