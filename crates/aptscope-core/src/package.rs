/// A package name as reported by aptitude, annotated with whether the
/// package was installed automatically as a dependency rather than by
/// explicit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageName {
    pub name: String,
    pub automatic: bool,
}

impl PackageName {
    /// Build from a raw aptitude token. A trailing `{a}` marker flags the
    /// package as automatically installed and is stripped from the name.
    pub fn from_token(token: &str) -> Self {
        match token.strip_suffix("{a}") {
            Some(name) => Self {
                name: name.to_string(),
                automatic: true,
            },
            None => Self {
                name: token.to_string(),
                automatic: false,
            },
        }
    }
}
