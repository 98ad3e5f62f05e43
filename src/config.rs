use crate::error::QpacError;
use std::str::FromStr;

/// Entropy (bits/symbol) below which delta coding is attempted.
pub const DEFAULT_DELTA_ENTROPY_GATE: f64 = 4.0;

/// How a HYBRID payload records the pipeline order that produced it.
///
/// Only the encoder consults this; the decoder tells the layouts apart from
/// the payload's first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HybridLayout {
    /// First payload byte names the order; decoding is deterministic.
    Tagged,
    /// Bare pipeline output; decoding trial-decodes both orders.
    Untagged,
}

#[derive(Debug, Clone)]
pub struct QpacConfig {
    pub try_hybrid: bool,
    pub accelerate_entropy: bool,
    pub delta_entropy_gate: f64,
    pub hybrid_layout: HybridLayout,
}

impl Default for QpacConfig {
    fn default() -> Self {
        Self {
            try_hybrid: true,
            accelerate_entropy: false,
            delta_entropy_gate: DEFAULT_DELTA_ENTROPY_GATE,
            hybrid_layout: HybridLayout::Tagged,
        }
    }
}

impl QpacConfig {
    pub fn with_hybrid(mut self, try_hybrid: bool) -> Self {
        self.try_hybrid = try_hybrid;
        self
    }

    pub fn with_accelerated_entropy(mut self, accelerate: bool) -> Self {
        self.accelerate_entropy = accelerate;
        self
    }

    pub fn with_delta_entropy_gate(mut self, gate: f64) -> Self {
        self.delta_entropy_gate = gate;
        self
    }

    pub fn with_hybrid_layout(mut self, layout: HybridLayout) -> Self {
        self.hybrid_layout = layout;
        self
    }

    pub fn validate(&self) -> Result<(), QpacError> {
        if !(0.0..=8.0).contains(&self.delta_entropy_gate) {
            return Err(QpacError::Config(format!(
                "Delta entropy gate must lie in [0, 8] bits/symbol, got {}",
                self.delta_entropy_gate
            )));
        }
        Ok(())
    }
}

impl FromStr for HybridLayout {
    type Err = QpacError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tagged" => Ok(HybridLayout::Tagged),
            "untagged" => Ok(HybridLayout::Untagged),
            _ => Err(QpacError::Config(format!("Invalid hybrid layout: {}", s))),
        }
    }
}
