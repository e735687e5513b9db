use engine_logging::{engine_debug, engine_warn};
use tokviz_core::{BackendKind, Effect, Msg};
use tokviz_engine::{BackendRegistry, BackendStatus};

/// Executes core effects synchronously against the loaded backends.
pub struct EffectRunner {
    registry: BackendRegistry,
}

impl EffectRunner {
    pub fn new(registry: BackendRegistry) -> Self {
        Self { registry }
    }

    pub fn status(&self, kind: BackendKind) -> BackendStatus {
        self.registry.status(kind)
    }

    /// Runs every effect to completion and returns the resulting messages.
    pub fn run(&self, effects: Vec<Effect>) -> Vec<Msg> {
        effects
            .into_iter()
            .map(|effect| match effect {
                Effect::Tokenize {
                    backend,
                    text,
                    revision,
                } => {
                    engine_debug!(
                        "Tokenize backend={} revision={} text_len={}",
                        backend,
                        revision,
                        text.len()
                    );
                    let result = self
                        .registry
                        .tokenize(backend, &text)
                        .map_err(|err| {
                            engine_warn!("Tokenize failed backend={}: {}", backend, err);
                            err.to_string()
                        });
                    Msg::Tokenized {
                        backend,
                        revision,
                        result,
                    }
                }
            })
            .collect()
    }
}
