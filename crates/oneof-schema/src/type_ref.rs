use std::{fmt, str::FromStr};

use cynic_parser::common::WrappingType;

use crate::Error;

/// A reference to a named type with its list and non-null wrappers.
///
/// Stored as its SDL spelling (`[SearchResult!]!`) in the JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    #[must_use]
    pub fn non_null(self) -> Self {
        match self {
            TypeRef::NonNull(_) => self,
            other => TypeRef::NonNull(Box::new(other)),
        }
    }

    #[must_use]
    pub fn list(self) -> Self {
        TypeRef::List(Box::new(self))
    }

    /// The innermost named type.
    pub fn name(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.name(),
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }

    /// Builds a reference from a parsed SDL type. `wrappers` runs from the
    /// outermost wrapper inwards, the order `cynic-parser` yields them in.
    pub(crate) fn from_wrappers(name: &str, wrappers: impl IntoIterator<Item = WrappingType>) -> Self {
        let wrappers = wrappers.into_iter().collect::<Vec<_>>();

        wrappers.into_iter().rev().fold(TypeRef::named(name), |inner, wrapper| match wrapper {
            WrappingType::NonNull => TypeRef::NonNull(Box::new(inner)),
            WrappingType::List => TypeRef::List(Box::new(inner)),
        })
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::List(inner) => write!(f, "[{inner}]"),
            TypeRef::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

impl FromStr for TypeRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s.trim()).ok_or_else(|| Error::InvalidTypeRef(s.to_string()))
    }
}

fn parse(s: &str) -> Option<TypeRef> {
    if let Some(inner) = s.strip_suffix('!') {
        return match parse(inner.trim_end())? {
            TypeRef::NonNull(_) => None,
            inner => Some(TypeRef::NonNull(Box::new(inner))),
        };
    }

    if let Some(inner) = s.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        return parse(inner.trim()).map(|inner| TypeRef::List(Box::new(inner)));
    }

    let mut chars = s.chars();
    let first = chars.next()?;

    let valid = (first.is_ascii_alphabetic() || first == '_') && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    valid.then(|| TypeRef::named(s))
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for TypeRef {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_prints_wrapped_types() {
        let cases = ["String", "ID!", "[SearchResult]", "[SearchResult!]!", "[[Int!]]!"];

        for case in cases {
            assert_eq!(case, case.parse::<TypeRef>().unwrap().to_string());
        }
    }

    #[test]
    fn rejects_malformed_references() {
        for case in ["", "String!!", "[String", "1Thing", "Search Result"] {
            assert!(case.parse::<TypeRef>().is_err(), "{case} should not parse");
        }
    }

    #[test]
    fn wrappers_apply_outermost_first() {
        let ty = TypeRef::from_wrappers(
            "SearchResult",
            [WrappingType::NonNull, WrappingType::List, WrappingType::NonNull],
        );

        assert_eq!(ty.to_string(), "[SearchResult!]!");
        assert_eq!(ty.name(), "SearchResult");
        assert!(ty.is_non_null());
    }
}
