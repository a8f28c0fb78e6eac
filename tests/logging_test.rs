#![cfg(feature = "std")]

use broadside::init_logging;

#[test]
fn test_init_logging_twice() {
    std::env::set_var("BROADSIDE_LOG", "warn,broadside::core=debug");
    init_logging();
    init_logging();
    log::debug!(target: "broadside::core::game", "filtered through the subscriber");
    log::info!("dropped at warn");
}
