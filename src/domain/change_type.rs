use crate::error::{ReleaseNotesError, Result};
use std::cmp::Ordering;

/// Code of the type that removes a change from the release notes.
pub const IGNORE_CODE: char = 'x';

/// A weighted category used to classify a change
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Type {
    name: String,
    code: char,
    description: String,
    weight: i32,
}

impl Type {
    /// Create a new type
    ///
    /// # Arguments
    /// * `name` - Short name, matched against issue tracker categories
    /// * `code` - Single character used to pick the type from a menu
    /// * `description` - Section header in the release notes
    /// * `weight` - Significance of the change; higher is more significant
    pub fn new(
        name: impl Into<String>,
        code: char,
        description: impl Into<String>,
        weight: i32,
    ) -> Self {
        Type {
            name: name.into(),
            code,
            description: description.into(),
            weight,
        }
    }

    /// The type that drops a change from the release notes
    pub fn ignored() -> Self {
        Type::new(
            "Ignore",
            IGNORE_CODE,
            "Remove Pull Request from Release Notes",
            0,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> char {
        self.code
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn weight(&self) -> i32 {
        self.weight
    }

    pub fn is_ignored(&self) -> bool {
        self.code == IGNORE_CODE
    }

    /// Sort order for types: weight descending, then name ascending.
    ///
    /// Returns `Ordering::Equal` only when both weight and name match.
    pub fn sort_order(a: &Type, b: &Type) -> Ordering {
        b.weight
            .cmp(&a.weight)
            .then_with(|| a.name.cmp(&b.name))
    }
}

/// Registry of the change types available for classification.
///
/// Types are kept sorted by [`Type::sort_order`] and codes are unique. Four
/// roles (breaking, major, minor, default) refer to registered types by code.
#[derive(Debug, Clone, Default)]
pub struct TypeManager {
    types: Vec<Type>,
    bc_code: Option<char>,
    major_code: Option<char>,
    minor_code: Option<char>,
    default_code: Option<char>,
}

impl TypeManager {
    pub fn new() -> Self {
        TypeManager::default()
    }

    /// Register a type, keeping the set sorted.
    ///
    /// # Returns
    /// * `Ok(())` - Type added
    /// * `Err(DuplicateTypeCode)` - A type with the same code is already registered
    pub fn add(&mut self, change_type: Type) -> Result<()> {
        if self.get_type_by_code(change_type.code()).is_some() {
            return Err(ReleaseNotesError::DuplicateTypeCode(change_type.code()));
        }

        self.types.push(change_type);
        self.types.sort_by(Type::sort_order);
        Ok(())
    }

    pub fn get_type_by_code(&self, code: char) -> Option<&Type> {
        self.types.iter().find(|t| t.code() == code)
    }

    pub fn get_type_by_name(&self, name: &str) -> Option<&Type> {
        self.types.iter().find(|t| t.name() == name)
    }

    /// All registered types in sort order
    pub fn types(&self) -> &[Type] {
        &self.types
    }

    /// Ordered `(code, description)` pairs for menu rendering
    pub fn get_types_for_command(&self) -> Vec<(char, String)> {
        self.types
            .iter()
            .map(|t| (t.code(), t.description().to_string()))
            .collect()
    }

    pub fn set_bc_type(&mut self, code: char) -> Result<()> {
        self.bc_code = Some(self.require(code)?);
        Ok(())
    }

    pub fn set_major_type(&mut self, code: char) -> Result<()> {
        self.major_code = Some(self.require(code)?);
        Ok(())
    }

    pub fn set_minor_type(&mut self, code: char) -> Result<()> {
        self.minor_code = Some(self.require(code)?);
        Ok(())
    }

    pub fn set_default_type(&mut self, code: char) -> Result<()> {
        self.default_code = Some(self.require(code)?);
        Ok(())
    }

    pub fn bc_type(&self) -> Option<&Type> {
        self.bc_code.and_then(|c| self.get_type_by_code(c))
    }

    pub fn major_type(&self) -> Option<&Type> {
        self.major_code.and_then(|c| self.get_type_by_code(c))
    }

    pub fn minor_type(&self) -> Option<&Type> {
        self.minor_code.and_then(|c| self.get_type_by_code(c))
    }

    pub fn default_type(&self) -> Option<&Type> {
        self.default_code.and_then(|c| self.get_type_by_code(c))
    }

    /// The registered ignore type, or the canonical one if none is registered
    pub fn ignore_type(&self) -> Type {
        self.get_type_by_code(IGNORE_CODE)
            .cloned()
            .unwrap_or_else(Type::ignored)
    }

    /// Type given to freshly created changes before classification
    pub fn initial_type(&self) -> Type {
        self.default_type()
            .or_else(|| self.minor_type())
            .cloned()
            .unwrap_or_else(|| Type::new("Minor", 'm', "Minor Features", 60))
    }

    fn require(&self, code: char) -> Result<char> {
        self.get_type_by_code(code)
            .map(|t| t.code())
            .ok_or(ReleaseNotesError::UnknownTypeCode(code))
    }

    /// Build the standard semantic-versioning type set.
    ///
    /// | code | name                         | weight |
    /// |------|------------------------------|--------|
    /// | `B`  | Backward Compatible Breakers | 100    |
    /// | `M`  | Major                        | 80     |
    /// | `m`  | Minor                        | 60     |
    /// | `b`  | Bug                          | 40     |
    /// | `d`  | Developer                    | 20     |
    /// | `x`  | Ignore                       | 0      |
    pub fn semantic() -> Self {
        Self::build_semantic().expect("semantic seed types have distinct codes")
    }

    fn build_semantic() -> Result<Self> {
        let mut manager = TypeManager::new();
        let seeds = [
            Type::new(
                "Backward Compatible Breakers",
                'B',
                "Backward Compatibility Breakers",
                100,
            ),
            Type::new("Major", 'M', "Major Features", 80),
            Type::new("Minor", 'm', "Minor Features", 60),
            Type::new("Bug", 'b', "Bug Fixes", 40),
            Type::new("Developer", 'd', "Developer Changes", 20),
            Type::ignored(),
        ];

        for seed in seeds {
            manager.add(seed)?;
        }
        manager.set_bc_type('B')?;
        manager.set_major_type('M')?;
        manager.set_minor_type('m')?;
        manager.set_default_type('m')?;

        Ok(manager)
    }
}
