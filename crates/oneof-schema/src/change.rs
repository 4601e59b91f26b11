use std::collections::BTreeMap;

use crate::{InputObjectKind, SchemaDocument};

/// A difference in input object constraints between two schema descriptions.
/// Changes have a direction: from `source` to `target`.
#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug, serde::Serialize)]
pub struct OneOfChange {
    /// Name of the input object.
    pub path: String,
    pub kind: OneOfChangeKind,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug, serde::Serialize)]
pub enum OneOfChangeKind {
    /// One-of in the source, ordinary in the target.
    LoseOneOf,
    /// Ordinary in the source, one-of in the target.
    GainOneOf,
    /// The input object only exists in the source.
    RemoveInputObject,
    /// The input object only exists in the target.
    AddInputObject,
}

/// Compares the input objects of two schema descriptions.
///
/// An empty result means every input object kept its constraint, which is what
/// an export followed by an import must produce.
pub fn compare(source: &SchemaDocument, target: &SchemaDocument) -> Vec<OneOfChange> {
    let mut inputs: BTreeMap<&str, [Option<InputObjectKind>; 2]> = BTreeMap::new();

    for input in source.input_objects() {
        inputs.entry(input.name.as_str()).or_default()[0] = Some(input.input_kind);
    }

    for input in target.input_objects() {
        inputs.entry(input.name.as_str()).or_default()[1] = Some(input.input_kind);
    }

    let changes: Vec<_> = inputs
        .into_iter()
        .filter_map(|(name, kinds)| {
            let kind = match kinds {
                [Some(InputObjectKind::OneOf), Some(InputObjectKind::Ordinary)] => OneOfChangeKind::LoseOneOf,
                [Some(InputObjectKind::Ordinary), Some(InputObjectKind::OneOf)] => OneOfChangeKind::GainOneOf,
                [Some(_), None] => OneOfChangeKind::RemoveInputObject,
                [None, Some(_)] => OneOfChangeKind::AddInputObject,
                _ => return None,
            };

            Some(OneOfChange {
                path: name.to_string(),
                kind,
            })
        })
        .collect();

    for change in changes.iter().filter(|change| change.kind == OneOfChangeKind::LoseOneOf) {
        tracing::warn!(input_object = %change.path, "the @oneOf constraint was lost");
    }

    changes
}
