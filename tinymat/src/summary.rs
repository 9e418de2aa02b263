//! Diagnostic-only session summary, gated behind the `serde` feature.
//!
//! Never touches the wire encoding: this is for callers who want to
//! log or assert on the shape of what a session has written so far.

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct VariableSummary {
    pub name: String,
    pub class: String,
    pub dims: Vec<i32>,
}

/// Running record of every top-level variable written in a [`crate::MatFile`]
/// session, for diagnostics only.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct MatFileSummary {
    pub variables: Vec<VariableSummary>,
}

impl MatFileSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: &str, class: &str, dims: &[i32]) {
        self.variables.push(VariableSummary {
            name: name.to_string(),
            class: class.to_string(),
            dims: dims.to_vec(),
        });
    }
}
