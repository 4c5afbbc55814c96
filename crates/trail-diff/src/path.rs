//! Path-string helpers for locating fields within compared structures.
//!
//! Paths are display strings in dot/bracket notation (`personalInfo.email`,
//! `skills[2]`), not live references into the documents.

/// Extend a path with an object key.
pub fn child(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

/// Extend a path with an array index.
pub fn index(parent: &str, i: usize) -> String {
    format!("{parent}[{i}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_of_root_is_bare_key() {
        assert_eq!(child("", "email"), "email");
    }

    #[test]
    fn child_joins_with_dot() {
        assert_eq!(child("personalInfo", "email"), "personalInfo.email");
        assert_eq!(child("a.b", "c"), "a.b.c");
    }

    #[test]
    fn index_uses_brackets() {
        assert_eq!(index("skills", 2), "skills[2]");
        assert_eq!(index("", 0), "[0]");
        assert_eq!(index("a.b[1]", 3), "a.b[1][3]");
    }
}
