use crate::SourceLocation;
use std::borrow::Cow;

/// A GraphQL name with its source location.
#[derive(Clone, Debug, PartialEq)]
pub struct Name<'src> {
    pub value: Cow<'src, str>,
    pub loc: SourceLocation,
}

impl Name<'_> {
    pub fn as_str(&self) -> &str {
        self.value.as_ref()
    }
}

impl std::fmt::Display for Name<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value.as_ref())
    }
}
