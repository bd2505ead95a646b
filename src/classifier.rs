//! Header-based column classification.
//!
//! A header is assigned a [`ColumnRole`] by case-insensitive substring match.
//! When a header contains keywords of several roles, the first role in
//! [`PRECEDENCE`] wins: Name, then Phone, then Email.

use std::fmt;

/// PII class of an input column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    Name,
    Phone,
    Email,
    Unclassified,
}

/// Roles tried in order; the first whose keywords match wins.
pub const PRECEDENCE: [ColumnRole; 3] = [ColumnRole::Name, ColumnRole::Phone, ColumnRole::Email];

impl ColumnRole {
    /// Role of `header` under first-match-wins precedence.
    pub fn classify(header: &str) -> Self {
        PRECEDENCE
            .into_iter()
            .find(|role| role.matches(header))
            .unwrap_or(Self::Unclassified)
    }

    /// Substrings that mark a header as this role.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Name => &["nome"],
            Self::Phone => &["fone", "phone"],
            Self::Email => &["mail"],
            Self::Unclassified => &[],
        }
    }

    /// Whether `header` carries one of this role's keywords, ignoring the
    /// other roles entirely.
    pub fn matches(self, header: &str) -> bool {
        let lower = header.to_lowercase();
        self.keywords().iter().any(|k| lower.contains(*k))
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Unclassified => "unclassified",
        };
        f.write_str(label)
    }
}

/// Classify every header, preserving input order.
pub fn classify_columns<'a>(headers: &[&'a str]) -> Vec<(&'a str, ColumnRole)> {
    headers
        .iter()
        .map(|&h| (h, ColumnRole::classify(h)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_roles() {
        assert_eq!(ColumnRole::classify("Nome"), ColumnRole::Name);
        assert_eq!(ColumnRole::classify("nome_cliente"), ColumnRole::Name);
        assert_eq!(ColumnRole::classify("telefone1"), ColumnRole::Phone);
        assert_eq!(ColumnRole::classify("FONE1"), ColumnRole::Phone);
        assert_eq!(ColumnRole::classify("Phone Number"), ColumnRole::Phone);
        assert_eq!(ColumnRole::classify("EMAIL1"), ColumnRole::Email);
        assert_eq!(ColumnRole::classify("e-mail"), ColumnRole::Email);
        assert_eq!(ColumnRole::classify("cidade"), ColumnRole::Unclassified);
    }

    #[test]
    fn test_precedence() {
        assert_eq!(ColumnRole::classify("nome_email"), ColumnRole::Name);
        assert_eq!(ColumnRole::classify("phone_or_mail"), ColumnRole::Phone);
        assert_eq!(ColumnRole::classify("SOBRENOME_TELEFONE"), ColumnRole::Name);
    }

    #[test]
    fn test_matches_ignores_precedence() {
        assert!(ColumnRole::Email.matches("nome_email"));
        assert!(ColumnRole::Phone.matches("Celular/Telefone"));
        assert!(!ColumnRole::Phone.matches("EMAIL"));
        assert!(!ColumnRole::Unclassified.matches("anything"));
    }

    #[test]
    fn test_classify_columns_keeps_order() {
        let roles = classify_columns(&["id", "Nome", "fone", "mail"]);
        assert_eq!(
            roles,
            vec![
                ("id", ColumnRole::Unclassified),
                ("Nome", ColumnRole::Name),
                ("fone", ColumnRole::Phone),
                ("mail", ColumnRole::Email),
            ]
        );
    }
}
