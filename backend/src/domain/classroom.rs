//! Classes owned by a single user.

use std::fmt;

use super::UserId;

/// Maximum allowed length for a class name.
pub const CLASS_NAME_MAX: usize = 120;

/// Validation errors returned by [`ClassName::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassValidationError {
    /// Name was missing, null, or blank once trimmed.
    EmptyName,
    /// Name exceeds [`CLASS_NAME_MAX`] characters.
    NameTooLong { max: usize },
}

impl fmt::Display for ClassValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "class name is required"),
            Self::NameTooLong { max } => write!(f, "class name must be at most {max} characters"),
        }
    }
}

impl std::error::Error for ClassValidationError {}

/// Storage-assigned class identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(i32);

impl ClassId {
    /// Wrap a storage-assigned identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-text class name, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassName(String);

impl ClassName {
    /// Validate and construct a [`ClassName`].
    ///
    /// # Examples
    /// ```
    /// use roster::domain::{ClassName, ClassValidationError};
    ///
    /// assert_eq!(ClassName::new(" Math ").unwrap().as_str(), "Math");
    /// assert_eq!(ClassName::new("  "), Err(ClassValidationError::EmptyName));
    /// ```
    pub fn new(name: impl AsRef<str>) -> Result<Self, ClassValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ClassValidationError::EmptyName);
        }
        if trimmed.chars().count() > CLASS_NAME_MAX {
            return Err(ClassValidationError::NameTooLong {
                max: CLASS_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Validate an optional raw name; absence counts as empty.
    pub fn from_input(name: Option<&str>) -> Result<Self, ClassValidationError> {
        Self::new(name.unwrap_or_default())
    }
}

impl ClassName {
    /// Borrow the validated text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ClassName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A class and its owning user.
///
/// ## Invariants
/// - Exactly one owner; only the owner can observe or mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classroom {
    id: ClassId,
    owner: UserId,
    name: ClassName,
}

impl Classroom {
    /// Build a [`Classroom`] from validated components.
    #[must_use]
    pub fn new(id: ClassId, owner: UserId, name: ClassName) -> Self {
        Self { id, owner, name }
    }

    /// Class identifier.
    #[must_use]
    pub fn id(&self) -> ClassId {
        self.id
    }

    /// Owning user.
    #[must_use]
    pub fn owner(&self) -> UserId {
        self.owner
    }

    /// Class name.
    #[must_use]
    pub fn name(&self) -> &ClassName {
        &self.name
    }
}
