//! The deployment-wide set of supported content languages.

use serde::{Deserialize, Serialize};

/// Source language plus the targets every announcement is translated into.
///
/// Configured once at deployment; never varies per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSet {
  /// Language operators author content in, e.g. `"en"`.
  pub source:  String,
  /// Languages each announcement is translated into, e.g. `["hi", "pa"]`.
  pub targets: Vec<String>,
}

impl Default for LanguageSet {
  fn default() -> Self {
    Self {
      source:  "en".to_owned(),
      targets: vec!["hi".to_owned(), "pa".to_owned()],
    }
  }
}

impl LanguageSet {
  /// Targets with the source language (and any duplicates) removed.
  pub fn effective_targets(&self) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::with_capacity(self.targets.len());
    for t in &self.targets {
      if t != &self.source && !out.contains(&t.as_str()) {
        out.push(t);
      }
    }
    out
  }

  pub fn is_supported(&self, code: &str) -> bool {
    code == self.source || self.targets.iter().any(|t| t == code)
  }

  /// The locale to serve for a requested code: the code itself if
  /// supported, otherwise the source language.
  pub fn resolve<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
    match requested {
      Some(code) if self.is_supported(code) => code,
      _ => &self.source,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn resolve_falls_back_to_source() {
    let langs = LanguageSet::default();
    assert_eq!(langs.resolve(Some("hi")), "hi");
    assert_eq!(langs.resolve(Some("zz")), "en");
    assert_eq!(langs.resolve(None), "en");
  }

  #[test]
  fn effective_targets_skip_source_and_duplicates() {
    let langs = LanguageSet {
      source:  "en".into(),
      targets: vec!["en".into(), "hi".into(), "hi".into(), "pa".into()],
    };
    assert_eq!(langs.effective_targets(), vec!["hi", "pa"]);
  }
}
