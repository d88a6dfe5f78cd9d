use images_concat_web::app::App;
use images_concat_web::config::{AppConfig, CONFIG_ELEMENT_ID};
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_err) = match AppConfig::load() {
        Ok(cfg) => (cfg, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    console_log::init_with_level(config.level()).expect("logger");
    if let Some(err) = config_err {
        log::warn!("ignoring malformed #{CONFIG_ELEMENT_ID}: {err}");
    }

    mount_to_body(move || view! { <App config=config /> });
}
