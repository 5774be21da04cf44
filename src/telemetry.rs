use tracing::{Subscriber, subscriber::set_global_default};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Registry, fmt::MakeWriter, layer::SubscriberExt};

/// Bunyan-formatted JSON subscriber writing to `sink`.
///
/// `RUST_LOG` wins over `env_filter` when it is set. Tests pass
/// `std::io::sink` to keep their output quiet.
pub fn get_subscriber<Sink>(
    name: String,
    env_filter: String,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    // log level comes from RUST_LOG if it's there, otherwise whatever the caller asked for
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    // bunyan turns each event into one line of json, tagged with `name`
    let formatting_layer = BunyanFormattingLayer::new(name, sink);

    // layers run in order: filter first, then store span fields, then print

    Registry::default()
        .with(env_filter)
        // span fields have to be stored for the bunyan layer to print them
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// # Panics
/// if a global logger or subscriber has already been installed
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) {
    // reqwest and hyper still log through `log`
    LogTracer::init().expect("Failed to set logger");
    // can only happen once per process, which is why the tests go through a LazyLock
    set_global_default(subscriber).expect("Failed to set subscriber");
}
