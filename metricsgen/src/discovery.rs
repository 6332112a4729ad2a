//! Discovery: the read-only pass over the declaration snapshot.
//!
//! Finds containers carrying the factory marker, extracts their namespace
//! and account arguments, and keeps the member functions that declare a
//! recognized metric kind. Each container stands alone: a malformed one is
//! reported and skipped without disturbing the others.

use std::collections::HashMap;

use crate::corpus::TypeDeclaration;
use crate::error::GeneratorError;
use crate::marker::{is_factory_marker, MetricKind};

/// Everything synthesis needs to know about one eligible container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryModel {
    pub container: String,
    /// `None` when the container is declared outside any namespace; the
    /// emitted unit then carries no namespace qualifier.
    pub namespace: Option<String>,
    /// First factory marker argument, verbatim.
    pub metrics_namespace: String,
    /// Second factory marker argument, verbatim.
    pub metrics_account: String,
    /// Declaration order. Order only affects the emitted text layout and
    /// keeps it reproducible.
    pub metrics: Vec<MetricModel>,
}

/// One discovered metric declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricModel {
    pub method: String,
    pub result_type: String,
    /// Derived from `result_type`, see [`field_name`].
    pub field: String,
    pub kind: MetricKind,
}

/// Derive a field name from a result-type name: first character lower-cased,
/// remainder unchanged.
pub fn field_name(result_type: &str) -> String {
    let mut chars = result_type.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Scan a snapshot for factory-marked containers.
///
/// Fail-soft: a container that cannot be modeled is skipped with a warning
/// and the rest of the corpus proceeds.
pub fn discover(corpus: &[TypeDeclaration]) -> Vec<FactoryModel> {
    corpus
        .iter()
        .filter_map(|declaration| match discover_container(declaration) {
            Ok(model) => model,
            Err(e) => {
                log::warn!("skipping container: {e}");
                None
            }
        })
        .collect()
}

/// Model one declaration, or `None` when it does not carry the factory
/// marker.
pub fn discover_container(
    declaration: &TypeDeclaration,
) -> Result<Option<FactoryModel>, GeneratorError> {
    // The first factory marker wins, including when a container carries
    // several.
    let Some(factory_marker) = declaration.markers.iter().find(|m| is_factory_marker(m)) else {
        return Ok(None);
    };

    let mut arguments = factory_marker.arguments.iter();
    let (Some(metrics_namespace), Some(metrics_account)) = (arguments.next(), arguments.next())
    else {
        return Err(GeneratorError::MalformedMarker {
            container: declaration.name.clone(),
            found: factory_marker.arguments.len(),
        });
    };

    if declaration.namespace.is_none() {
        log::warn!(
            "container `{}` is declared outside any namespace; its factory is emitted without a namespace qualifier",
            declaration.name
        );
    }

    let mut claimed_fields: HashMap<String, String> = HashMap::new();
    let mut metrics = Vec::new();
    for method in &declaration.methods {
        let Some(kind) = MetricKind::resolve_first(&method.markers) else {
            continue;
        };
        let field = field_name(&method.result_type);
        if let Some(first) = claimed_fields.insert(field.clone(), method.name.clone()) {
            return Err(GeneratorError::FieldCollision {
                container: declaration.name.clone(),
                field,
                first,
                second: method.name.clone(),
            });
        }
        metrics.push(MetricModel {
            method: method.name.clone(),
            result_type: method.result_type.clone(),
            field,
            kind,
        });
    }

    Ok(Some(FactoryModel {
        container: declaration.name.clone(),
        namespace: declaration.namespace.clone(),
        metrics_namespace: metrics_namespace.value.clone(),
        metrics_account: metrics_account.value.clone(),
        metrics,
    }))
}
