//! Parameter binding
//!
//! At attach time every top-level schema node is bound to a position in
//! the target's declared parameter list, supplied explicitly by the
//! caller. The binding is resolved once and is immutable for the
//! lifetime of the wrapped function; an unresolved name is a
//! configuration error, never a runtime validation error.

use crate::schema::Schema;

use super::errors::ConfigError;

/// Mapping from top-level schema nodes to argument positions, in node
/// order.
#[derive(Debug, Clone)]
pub(crate) struct BindingTable {
    positions: Vec<usize>,
}

impl BindingTable {
    /// Resolves every top-level node against the parameter list.
    ///
    /// A node binds to the parameter matching its literal name, falling
    /// back to its dotted root segment for nested member rules.
    pub(crate) fn build(schema: &Schema, signature: &[&str]) -> Result<Self, ConfigError> {
        let mut positions = Vec::with_capacity(schema.nodes().len());
        for node in schema.nodes() {
            let root = node.name().split('.').next().unwrap_or_default();
            let position = signature
                .iter()
                .position(|parameter| *parameter == node.name())
                .or_else(|| signature.iter().position(|parameter| *parameter == root))
                .ok_or_else(|| ConfigError::UnresolvedBinding {
                    name: node.name().to_string(),
                })?;
            positions.push(position);
        }
        Ok(Self { positions })
    }

    pub(crate) fn positions(&self) -> &[usize] {
        &self.positions
    }
}
