//! Inference Response Decoding

use serde::Deserialize;

use crate::ClassifyError;

/// JSON body returned by the inference endpoint
#[derive(Debug, Deserialize)]
pub struct InferenceResponse {
    #[serde(default)]
    pub probabilities: Option<Probabilities>,
}

/// The `probabilities` field arrives in one of two shapes: a flat sequence
/// of numbers, or a wrapper holding a list of tagged numeric strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Probabilities {
    Flat(Vec<f64>),
    Tagged(TaggedList),
}

/// Attribute-value encoded list: `{"L": [{"N": "0.9"}, {"N": "0.1"}]}`
#[derive(Debug, Deserialize)]
pub struct TaggedList {
    #[serde(rename = "L")]
    pub values: Vec<TaggedNumber>,
}

#[derive(Debug, Deserialize)]
pub struct TaggedNumber {
    #[serde(rename = "N")]
    pub value: String,
}

impl InferenceResponse {
    /// Normalize both wire shapes to a plain probability vector.
    ///
    /// An absent `probabilities` field substitutes `[0.0, 0.0]`; a tagged
    /// value that does not parse as a number is an invalid response.
    pub fn into_probabilities(self) -> Result<Vec<f64>, ClassifyError> {
        match self.probabilities {
            None => Ok(vec![0.0, 0.0]),
            Some(Probabilities::Flat(probs)) => Ok(probs),
            Some(Probabilities::Tagged(list)) => list
                .values
                .into_iter()
                .map(|tagged| {
                    tagged.value.parse::<f64>().map_err(|e| {
                        ClassifyError::InvalidResponse(format!(
                            "bad tagged number {:?}: {}",
                            tagged.value, e
                        ))
                    })
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_flat_sequence() {
        let response: InferenceResponse =
            serde_json::from_str(r#"{"probabilities": [0.2, 0.8]}"#).unwrap();
        assert_eq!(response.into_probabilities().unwrap(), vec![0.2, 0.8]);
    }

    #[test]
    fn decodes_tagged_list() {
        let response: InferenceResponse =
            serde_json::from_str(r#"{"probabilities": {"L": [{"N": "0.9"}, {"N": "0.1"}]}}"#)
                .unwrap();
        assert_eq!(response.into_probabilities().unwrap(), vec![0.9, 0.1]);
    }

    #[test]
    fn absent_field_substitutes_zero_pair() {
        let response: InferenceResponse = serde_json::from_str(r#"{"other": 1}"#).unwrap();
        assert_eq!(response.into_probabilities().unwrap(), vec![0.0, 0.0]);
    }

    #[test]
    fn unparseable_tagged_number_is_invalid() {
        let response: InferenceResponse =
            serde_json::from_str(r#"{"probabilities": {"L": [{"N": "high"}]}}"#).unwrap();
        assert!(matches!(
            response.into_probabilities(),
            Err(ClassifyError::InvalidResponse(_))
        ));
    }

    #[test]
    fn unrecognized_shape_fails_to_decode() {
        let result = serde_json::from_str::<InferenceResponse>(r#"{"probabilities": "none"}"#);
        assert!(result.is_err());
    }
}
