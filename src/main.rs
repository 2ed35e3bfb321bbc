mod app;
mod board_view;
mod chat_view;
mod client;
mod config;
mod diag;
mod input;
mod roster_view;
mod socket;

fn main() {
    app::run();
}
