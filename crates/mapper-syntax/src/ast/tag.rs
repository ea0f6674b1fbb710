use std::fmt;

/// Directive tags recognised inside a statement body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    If,
    Choose,
    When,
    Otherwise,
    IsNotNull,
    Include,
    Where,
}

impl TagKind {
    /// Tag names are matched case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "if" => Some(TagKind::If),
            "choose" => Some(TagKind::Choose),
            "when" => Some(TagKind::When),
            "otherwise" => Some(TagKind::Otherwise),
            "isnotnull" => Some(TagKind::IsNotNull),
            "include" => Some(TagKind::Include),
            "where" => Some(TagKind::Where),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TagKind::If => "if",
            TagKind::Choose => "choose",
            TagKind::When => "when",
            TagKind::Otherwise => "otherwise",
            TagKind::IsNotNull => "isnotnull",
            TagKind::Include => "include",
            TagKind::Where => "where",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_names_are_case_insensitive() {
        assert_eq!(TagKind::from_name("if"), Some(TagKind::If));
        assert_eq!(TagKind::from_name("IsNotNull"), Some(TagKind::IsNotNull));
        assert_eq!(TagKind::from_name("WHERE"), Some(TagKind::Where));
        assert_eq!(TagKind::from_name("foreach"), None);
    }

    #[test]
    fn test_tag_display() {
        assert_eq!(format!("{}", TagKind::Otherwise), "otherwise");
        assert_eq!(TagKind::Include.as_str(), "include");
    }
}
