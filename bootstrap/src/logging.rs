use crate::args::CommonArgs;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber and, when a DSN is configured, Sentry.
///
/// The returned guard flushes pending Sentry events when dropped.
pub fn init(common_args: &CommonArgs) -> Option<sentry::ClientInitGuard> {
    let sentry_guard = common_args.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                environment: common_args.sentry_environment.clone().map(Into::into),
                sample_rate: common_args.sentry_sample_rate.unwrap_or(1.0),
                traces_sample_rate: common_args.sentry_traces_sample_rate.unwrap_or(0.0),
                ..Default::default()
            },
        ))
    });

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    sentry_guard
}
