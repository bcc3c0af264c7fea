use std::collections::HashMap;

/// Ceiling applied when a model is absent from the registry
/// (common for BERT-based models).
pub const DEFAULT_MAX_TOKENS: usize = 512;

/// Read-only map from model identifier to its maximum token window.
///
/// Built once at startup; configuration may merge extra entries over the
/// built-in table without touching chunker logic.
#[derive(Debug, Clone)]
pub struct ModelLimitRegistry {
    limits: HashMap<String, usize>,
}

impl Default for ModelLimitRegistry {
    fn default() -> Self {
        let limits = [
            ("bert-base-uncased", 512),
            ("bert-large-uncased", 512),
            ("distilbert-base-uncased", 512),
            ("sentence-transformers/all-MiniLM-L6-v2", 512),
            ("sentence-transformers/all-mpnet-base-v2", 512),
            ("sentence-transformers/paraphrase-MiniLM-L6-v2", 512),
            ("openai/clip-vit-base-patch32", 77),
            ("microsoft/codebert-base", 512),
            ("roberta-base", 512),
            ("roberta-large", 512),
        ]
        .into_iter()
        .map(|(model, limit)| (model.to_string(), limit))
        .collect();

        Self { limits }
    }
}

impl ModelLimitRegistry {
    /// Resolve the token ceiling for a model, falling back to
    /// [`DEFAULT_MAX_TOKENS`] for unknown or absent identifiers.
    pub fn limit(&self, model_id: Option<&str>) -> usize {
        model_id
            .and_then(|id| self.limits.get(id).copied())
            .unwrap_or(DEFAULT_MAX_TOKENS)
    }

    /// Merge overrides into the registry (configuration extension point).
    pub fn extend(&mut self, overrides: &HashMap<String, usize>) {
        for (model, limit) in overrides {
            self.limits.insert(model.clone(), *limit);
        }
    }
}
