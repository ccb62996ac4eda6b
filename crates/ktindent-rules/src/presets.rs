//! Rule sets.

use crate::Indentation;
use ktindent_core::RuleBox;

/// Returns all available rules with their default settings.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![Box::new(Indentation::new())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rule_codes_and_names_are_unique() {
        let rules = all_rules();
        let codes: HashSet<_> = rules.iter().map(|r| r.code()).collect();
        let names: HashSet<_> = rules.iter().map(|r| r.name()).collect();
        assert_eq!(codes.len(), rules.len());
        assert_eq!(names.len(), rules.len());
    }

    #[test]
    fn indent_is_included() {
        assert!(all_rules().iter().any(|r| r.code() == crate::indent::CODE));
    }
}
