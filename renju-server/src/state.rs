use renju_engine::Engine;

/// The server's shared, long-lived search state (spec.md §3's transposition
/// table and forbidden cache, kept alive across requests the way the
/// teacher's `ServerState` keeps per-game boards alive across requests).
/// A review worker has no notion of "the current game" the way the
/// teacher's play server does — every request carries its own move
/// history — so the only state worth keeping here is the engine itself.
pub struct ServerState {
    engine: Engine,
}

impl ServerState {
    pub fn new() -> Self {
        Self { engine: Engine::new() }
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}
