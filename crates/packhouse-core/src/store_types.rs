use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Document store backend types
///
/// Postgres keeps every collection in a single JSONB `documents` table; the
/// in-memory backend is used for local development and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStoreBackend {
    Postgres,
    Memory,
}

impl FromStr for DocumentStoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(DocumentStoreBackend::Postgres),
            "memory" => Ok(DocumentStoreBackend::Memory),
            _ => Err(anyhow::anyhow!("Invalid document store backend: {}", s)),
        }
    }
}

impl Display for DocumentStoreBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DocumentStoreBackend::Postgres => write!(f, "postgres"),
            DocumentStoreBackend::Memory => write!(f, "memory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_backends() {
        assert_eq!(
            "Postgres".parse::<DocumentStoreBackend>().unwrap(),
            DocumentStoreBackend::Postgres
        );
        assert_eq!(
            "memory".parse::<DocumentStoreBackend>().unwrap(),
            DocumentStoreBackend::Memory
        );
        assert!("mongo".parse::<DocumentStoreBackend>().is_err());
    }
}
