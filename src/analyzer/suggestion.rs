use crate::domain::{Change, TypeManager};
use crate::version::Increments;

/// Orders next-version candidates so the most fitting bump comes first.
///
/// - breaking change: major, minor, patch
/// - major feature: minor, patch, major
/// - anything else, or no changes: patch, minor, major
///
/// Calendar candidates are returned unchanged; an unparseable current version
/// yields no suggestions.
pub fn suggested_versions(
    increments: &Increments,
    largest: Option<&Change>,
    types: &TypeManager,
) -> Vec<String> {
    let Increments::Semantic {
        patch,
        minor,
        major,
    } = increments
    else {
        return increments.candidates();
    };

    let largest_code = largest.map(|c| c.change_type().code());
    let is = |designated: Option<char>| largest_code.is_some() && largest_code == designated;

    let order = if is(types.bc_type().map(|t| t.code())) {
        [major, minor, patch]
    } else if is(types.major_type().map(|t| t.code())) {
        [minor, patch, major]
    } else {
        [patch, minor, major]
    };

    order.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::{SemanticVersion, Version};

    fn change(code: char) -> Change {
        let types = TypeManager::semantic();
        Change::new("msg", types.get_type_by_code(code).unwrap().clone())
    }

    fn increments() -> Increments {
        SemanticVersion::parse("1.2.3").semantic_increments()
    }

    #[test]
    fn test_breaking_change_suggests_major_first() {
        let types = TypeManager::semantic();
        let c = change('B');
        assert_eq!(
            suggested_versions(&increments(), Some(&c), &types),
            vec!["2.0.0", "1.3.0", "1.2.4"]
        );
    }

    #[test]
    fn test_major_feature_suggests_minor_first() {
        let types = TypeManager::semantic();
        let c = change('M');
        assert_eq!(
            suggested_versions(&increments(), Some(&c), &types),
            vec!["1.3.0", "1.2.4", "2.0.0"]
        );
    }

    #[test]
    fn test_smaller_changes_suggest_patch_first() {
        let types = TypeManager::semantic();
        for code in ['m', 'b', 'd'] {
            let c = change(code);
            assert_eq!(
                suggested_versions(&increments(), Some(&c), &types),
                vec!["1.2.4", "1.3.0", "2.0.0"],
                "code {}",
                code
            );
        }
    }

    #[test]
    fn test_no_changes_suggest_patch_first() {
        let types = TypeManager::semantic();
        assert_eq!(
            suggested_versions(&increments(), None, &types),
            vec!["1.2.4", "1.3.0", "2.0.0"]
        );
    }

    #[test]
    fn test_calendar_and_opaque_versions() {
        let types = TypeManager::semantic();
        let c = change('B');
        assert_eq!(
            suggested_versions(&Increments::Calendar("26.10.1".to_string()), Some(&c), &types),
            vec!["26.10.1"]
        );
        assert!(suggested_versions(&Increments::None, Some(&c), &types).is_empty());
    }
}
