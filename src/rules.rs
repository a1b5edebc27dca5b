//! # Rules Module
//!
//! [`HeaderRules`] bundles everything a single check needs: the policy table,
//! the header template, and the year of the run. One value is built at start
//! up and shared by every file, so all files of a batch see the same year.

use std::path::Path;

use crate::header::HeaderTemplate;
use crate::policy::{HeaderPolicy, PolicyTable};

#[derive(Debug, Clone)]
pub struct HeaderRules {
  pub policies: PolicyTable,
  pub template: HeaderTemplate,
  pub year: i32,
}

impl HeaderRules {
  pub const fn new(policies: PolicyTable, template: HeaderTemplate, year: i32) -> Self {
    Self {
      policies,
      template,
      year,
    }
  }

  /// Built-in families and the default template for `year`.
  pub fn builtin(year: i32) -> Self {
    Self::new(PolicyTable::builtin(), HeaderTemplate::default(), year)
  }

  pub fn classify(&self, path: &Path) -> Option<&HeaderPolicy> {
    self.policies.classify(path)
  }

  /// Expected header lines for the file at `path`; empty when unsupported.
  pub fn expected_lines_for(&self, path: &Path) -> Vec<String> {
    self.template.expected_lines(self.classify(path), self.year)
  }
}
