mod app;

use trine_engine::logging::{init_logging, LoggingConfig};
use trine_engine::window::{Runtime, RuntimeConfig};

use app::TriangleApp;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "Triangle".to_string(),
        ..RuntimeConfig::default()
    };

    Runtime::run(config, TriangleApp::new())
}
