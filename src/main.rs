mod app_core;
mod boot;
mod dom_app;
mod input;
mod runtime;

fn main() {
    boot::set_phase("start", "initializing game state");
    dom_app::run();
}
