//! Classifier Adapter with Fallback

use std::sync::Arc;

use telemetry::{Label, Prediction};
use tracing::{debug, warn};

use crate::{ClassifyError, InferenceClient};

/// Fixed label ordering matched to the model's output vector
const LABELS: [Label; 2] = [Label::Positive, Label::Negative];

/// Maps inference responses to predictions, absorbing every failure mode
pub struct ClassifierAdapter {
    client: Arc<dyn InferenceClient>,
}

impl ClassifierAdapter {
    pub fn new(client: Arc<dyn InferenceClient>) -> Self {
        Self { client }
    }

    /// Classify a sentence. Never fails: transport errors, endpoint errors,
    /// and malformed responses all fall back to UNKNOWN with score 0.0.
    pub async fn classify(&self, sentence: &str) -> Prediction {
        match self.try_classify(sentence).await {
            Ok(prediction) => prediction,
            Err(e) => {
                warn!("Classification failed, falling back to UNKNOWN: {}", e);
                Prediction::unknown()
            }
        }
    }

    async fn try_classify(&self, sentence: &str) -> Result<Prediction, ClassifyError> {
        let response = self.client.infer(sentence).await?;
        let probs = response.into_probabilities()?;

        let (index, score) = argmax(&probs)
            .ok_or_else(|| ClassifyError::InvalidResponse("empty probability vector".into()))?;
        let label = *LABELS.get(index).ok_or_else(|| {
            ClassifyError::InvalidResponse(format!("no label for class index {}", index))
        })?;

        debug!("Classified sentence as {} ({:.3})", label.as_str(), score);
        Ok(Prediction { label, score })
    }
}

/// Index and value of the largest probability; ties keep the earliest index
fn argmax(probs: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &p) in probs.iter().enumerate() {
        match best {
            Some((_, current)) if p <= current => {}
            _ => best = Some((index, p)),
        }
    }
    best
}
