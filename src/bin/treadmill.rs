//=========================================================================
// Treadmill Demo
//=========================================================================
//
// Opens a window and drives the standard character with the default
// key bindings: W/↑ walk, +Shift run, Space jump, P pose.
//
// Logging defaults to `info` unless RUST_LOG overrides it.
//
//=========================================================================

use treadmill_locomotion::core::animation::ClipAsset;
use treadmill_locomotion::EngineBuilder;

fn main() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();

    EngineBuilder::new()
        .with_asset_loader(ClipAsset::standard_set)
        .build()
        .run();
}
