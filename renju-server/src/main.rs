#[macro_use]
extern crate rocket;

mod handlers;
mod messages;
mod notation;
mod state;

use state::ServerState;
use std::sync::Mutex;

#[launch]
fn run() -> _ {
    tracing_subscriber::fmt::init();

    // Initialize the random values for the zobrist keys that the board uses
    // before launching the server.
    renju_core::init_zobrist_keys();

    rocket::build()
        .mount("/", handlers::get_routes())
        .manage(Mutex::from(ServerState::new()))
}
