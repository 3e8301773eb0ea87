use clap::Parser;
use wasm_wizard_dist::install::install;
use wasm_wizard_dist::platform::HostEnv;

/// wasm-wizard-install - fetch the native wasm-wizard binary
///
/// Downloads the prebuilt wasm-wizard release asset for this platform.
/// When none is published, or the download fails, it is built from source
/// with `cargo install wasm-wizard` instead. The binary is written to
/// `native/` next to this installer, where the `wasm-wizard` launcher looks.
#[derive(Parser, Debug)]
#[command(author, version = env!("WASM_WIZARD_VERSION"), about)]
struct Cli {
    /// Release download host (defaults to the GitHub releases of wasm-wizard)
    #[arg(long = "releases-url", env = "WASM_WIZARD_RELEASES_URL", value_name = "URL")]
    pub releases_url: Option<String>,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = wasm_wizard_dist::runtime::RealRuntime;

    if let Err(e) = install(runtime, &HostEnv::current(), cli.releases_url).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
