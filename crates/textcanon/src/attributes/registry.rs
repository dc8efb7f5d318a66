//! The per-type set of attributes subject to encoding normalization.

/// Insertion-ordered, duplicate-free set of attribute names.
///
/// Registration is additive only. Order is kept for stable iteration but
/// carries no meaning for normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizationSet {
    names: Vec<String>,
}

impl NormalizationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union-add. Names already present are skipped; returns how many were new.
    pub fn insert_all<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = 0;
        for name in names {
            let name = name.into();
            if !self.contains(&name) {
                self.names.push(name);
                added += 1;
            }
        }
        added
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
