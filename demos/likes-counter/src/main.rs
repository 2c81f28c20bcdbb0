use likes_counter::MountConfig;

#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).expect("logger is only initialized once");

    if let Err(err) = likes_counter::mount(&MountConfig::default()) {
        log::error!("cannot mount the likes counter: {}", err);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let config = MountConfig::default();
    log::info!("rendering the likes counter with {} like(s)", config.initial_count);
    println!("{}", likes_counter::render_to_string(&config));
}
