//! Learned chaser steering
//!
//! Evaluates a small feed-forward network exported from offline training:
//! 3 inputs (dx_norm, dy_norm, distance), ReLU hidden layers, 2 tanh
//! outputs. Weights are stored as JSON:
//!
//! ```json
//! { "layers": [ { "weights": [[...], ...], "bias": [...], "activation": "relu" }, ... ] }
//! ```
//!
//! `weights[o][i]` connects input `i` to output `o`.

use std::path::Path;
use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::chaser::{DirectPursuit, MovementPolicy};

const INPUTS: usize = 3;
const OUTPUTS: usize = 2;

/// Errors raised while loading policy weights
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("failed to read policy weights: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed policy weights: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("layer {layer}: {reason}")]
    Shape { layer: usize, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Relu,
    Tanh,
    Linear,
}

impl Activation {
    #[inline]
    fn apply(self, x: f32) -> f32 {
        match self {
            Activation::Relu => x.max(0.0),
            Activation::Tanh => x.tanh(),
            Activation::Linear => x,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
    pub activation: Activation,
}

impl DenseLayer {
    fn inputs(&self) -> usize {
        self.weights.first().map_or(0, Vec::len)
    }

    fn forward(&self, input: &[f32]) -> Vec<f32> {
        self.weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| {
                let sum: f32 = row.iter().zip(input).map(|(w, x)| w * x).sum();
                self.activation.apply(sum + b)
            })
            .collect()
    }
}

/// Feed-forward steering network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensePolicy {
    pub layers: Vec<DenseLayer>,
}

impl DensePolicy {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, PolicyError> {
        let policy: DensePolicy = serde_json::from_str(text)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Check that layer shapes chain from 3 inputs to 2 outputs
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.layers.is_empty() {
            return Err(PolicyError::Shape {
                layer: 0,
                reason: "network has no layers".into(),
            });
        }
        let mut width = INPUTS;
        for (layer, dense) in self.layers.iter().enumerate() {
            if dense.weights.is_empty() || dense.weights.iter().any(|row| row.len() != dense.inputs()) {
                return Err(PolicyError::Shape {
                    layer,
                    reason: "weight rows are empty or ragged".into(),
                });
            }
            if dense.inputs() != width {
                return Err(PolicyError::Shape {
                    layer,
                    reason: format!("expects {} inputs, previous layer gives {width}", dense.inputs()),
                });
            }
            if dense.bias.len() != dense.weights.len() {
                return Err(PolicyError::Shape {
                    layer,
                    reason: format!("{} biases for {} outputs", dense.bias.len(), dense.weights.len()),
                });
            }
            width = dense.weights.len();
        }
        if width != OUTPUTS {
            return Err(PolicyError::Shape {
                layer: self.layers.len() - 1,
                reason: format!("network outputs {width} values, expected {OUTPUTS}"),
            });
        }
        Ok(())
    }
}

impl MovementPolicy for DensePolicy {
    fn infer(&self, dx_norm: f32, dy_norm: f32, distance: f32) -> Vec2 {
        let mut values = vec![dx_norm, dy_norm, distance];
        for layer in &self.layers {
            values = layer.forward(&values);
        }
        let action = Vec2::new(values[0], values[1]);
        if action.is_finite() {
            action.clamp(Vec2::NEG_ONE, Vec2::ONE)
        } else {
            Vec2::ZERO
        }
    }

    fn name(&self) -> &str {
        "dense"
    }
}

/// Pick the chaser policy at start-up
///
/// A missing or unreadable weight file is not fatal: the chaser falls back
/// to direct pursuit.
pub fn select_policy(path: Option<&Path>) -> Arc<dyn MovementPolicy> {
    let Some(path) = path else {
        log::info!("No chaser policy configured, using direct pursuit");
        return Arc::new(DirectPursuit);
    };
    match DensePolicy::load(path) {
        Ok(policy) => {
            log::info!(
                "Loaded chaser policy from {} ({} layers)",
                path.display(),
                policy.layers.len()
            );
            Arc::new(policy)
        }
        Err(e) => {
            log::warn!("Chaser policy unavailable ({e}), using direct pursuit");
            Arc::new(DirectPursuit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Single tanh layer passing dx/dy straight through
    fn passthrough() -> DensePolicy {
        DensePolicy {
            layers: vec![DenseLayer {
                weights: vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]],
                bias: vec![0.0, 0.0],
                activation: Activation::Tanh,
            }],
        }
    }

    #[test]
    fn test_forward_pass() {
        let policy = passthrough();
        let action = policy.infer(1.0, -0.5, 300.0);
        assert!((action.x - 1.0f32.tanh()).abs() < 1e-6);
        assert!((action.y - (-0.5f32).tanh()).abs() < 1e-6);
    }

    #[test]
    fn test_relu_hidden_layer() {
        let policy = DensePolicy {
            layers: vec![
                DenseLayer {
                    weights: vec![vec![1.0, 0.0, 0.0], vec![-1.0, 0.0, 0.0]],
                    bias: vec![0.0, 0.0],
                    activation: Activation::Relu,
                },
                DenseLayer {
                    weights: vec![vec![1.0, 0.0], vec![0.0, 1.0]],
                    bias: vec![0.0, 0.0],
                    activation: Activation::Linear,
                },
            ],
        };
        policy.validate().unwrap();
        // ReLU zeroes the negated branch; linear output is clamped
        assert_eq!(policy.infer(0.5, 0.0, 0.0), Vec2::new(0.5, 0.0));
        assert_eq!(policy.infer(-3.0, 0.0, 0.0), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_json_round_trip_and_validation() {
        let json = serde_json::to_string(&passthrough()).unwrap();
        assert!(json.contains("\"tanh\""));
        assert_eq!(DensePolicy::from_json(&json).unwrap(), passthrough());

        let bad = r#"{ "layers": [ { "weights": [[1, 0], [0, 1]], "bias": [0, 0], "activation": "tanh" } ] }"#;
        assert!(matches!(
            DensePolicy::from_json(bad),
            Err(PolicyError::Shape { layer: 0, .. })
        ));

        let wrong_outputs = r#"{ "layers": [ { "weights": [[1, 0, 0]], "bias": [0], "activation": "tanh" } ] }"#;
        assert!(matches!(
            DensePolicy::from_json(wrong_outputs),
            Err(PolicyError::Shape { .. })
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let policy = select_policy(Some(Path::new("/nonexistent/chaser_policy.json")));
        assert_eq!(policy.name(), "direct");
        assert_eq!(select_policy(None).name(), "direct");
    }
}
