use super::GameSignal;

/// Receives signals after each processed callback.
///
/// Handlers run on the delivering thread while the session lock is held, so
/// they must not call back into the tracker.
pub trait SignalHandler {
    fn handle_signal(&self, signal: &GameSignal);

    fn handle_signals(&self, signals: &[GameSignal]) {
        for signal in signals {
            self.handle_signal(signal);
        }
    }
}
