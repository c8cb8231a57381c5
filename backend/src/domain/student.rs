//! Students enrolled in a class.
//!
//! Students carry no owner of their own; ownership is always derived through
//! the parent class. Raw input arrives as [`StudentInput`] so services can
//! resolve ownership before validating the payload.

use std::fmt;

use super::ClassId;

/// Validation errors raised while building a [`StudentDraft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentValidationError {
    /// Name blank or age missing.
    MissingFields,
    /// Age could not be interpreted as an integer.
    AgeNotNumeric,
    /// Name exceeds [`STUDENT_NAME_MAX`] characters.
    NameTooLong { max: usize },
}

impl fmt::Display for StudentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => write!(f, "name and age are required"),
            Self::AgeNotNumeric => write!(f, "age must be numeric"),
            Self::NameTooLong { max } => {
                write!(f, "student name must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for StudentValidationError {}

/// Storage-assigned student identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StudentId(i32);

impl StudentId {
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

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum allowed length for a student name.
pub const STUDENT_NAME_MAX: usize = 120;

/// Student name, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentName(String);

impl StudentName {
    /// Validate and construct a [`StudentName`].
    pub fn new(name: impl AsRef<str>) -> Result<Self, StudentValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(StudentValidationError::MissingFields);
        }
        if trimmed.chars().count() > STUDENT_NAME_MAX {
            return Err(StudentValidationError::NameTooLong {
                max: STUDENT_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl StudentName {
    /// Borrow the validated text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for StudentName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Integer age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Age(i32);

impl Age {
    /// Wrap a stored age.
    #[must_use]
    pub const fn new(age: i32) -> Self {
        Self(age)
    }

    /// Raw age value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i64> for Age {
    type Error = StudentValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        i32::try_from(value)
            .map(Self)
            .map_err(|_| StudentValidationError::AgeNotNumeric)
    }
}

/// Age exactly as supplied by a client, before integer conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum AgeInput {
    /// A whole number.
    Integer(i64),
    /// A number with a fractional part; truncated toward zero.
    Fractional(f64),
    /// Text that may contain an integer.
    Text(String),
    /// Any other shape (boolean, list, object).
    Unsupported,
}

impl AgeInput {
    /// Convert the raw value into an [`Age`].
    ///
    /// # Examples
    /// ```
    /// use roster::domain::{AgeInput, StudentValidationError};
    ///
    /// assert_eq!(AgeInput::Text(" 12 ".into()).into_age().unwrap().get(), 12);
    /// assert_eq!(AgeInput::Fractional(9.7).into_age().unwrap().get(), 9);
    /// assert_eq!(
    ///     AgeInput::Text("abc".into()).into_age(),
    ///     Err(StudentValidationError::AgeNotNumeric)
    /// );
    /// ```
    pub fn into_age(self) -> Result<Age, StudentValidationError> {
        match self {
            Self::Integer(value) => Age::try_from(value),
            Self::Fractional(value) => truncate_fraction(value),
            Self::Text(text) => text
                .trim()
                .parse::<i64>()
                .map_err(|_| StudentValidationError::AgeNotNumeric)
                .and_then(Age::try_from),
            Self::Unsupported => Err(StudentValidationError::AgeNotNumeric),
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "value is finite and range checked against i32 before the cast"
)]
fn truncate_fraction(value: f64) -> Result<Age, StudentValidationError> {
    let truncated = value.trunc();
    if !truncated.is_finite()
        || truncated < f64::from(i32::MIN)
        || truncated > f64::from(i32::MAX)
    {
        return Err(StudentValidationError::AgeNotNumeric);
    }
    Ok(Age(truncated as i32))
}

/// Unvalidated student payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentInput {
    /// Raw name; `None` when absent or null.
    pub name: Option<String>,
    /// Raw age; `None` when absent or null.
    pub age: Option<AgeInput>,
}

/// Validated name and age ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    name: StudentName,
    age: Age,
}

impl StudentDraft {
    /// Build a draft from validated parts.
    #[must_use]
    pub fn new(name: StudentName, age: Age) -> Self {
        Self { name, age }
    }

    /// Validated name.
    #[must_use]
    pub fn name(&self) -> &StudentName {
        &self.name
    }

    /// Validated age.
    #[must_use]
    pub fn age(&self) -> Age {
        self.age
    }
}

impl TryFrom<StudentInput> for StudentDraft {
    type Error = StudentValidationError;

    /// Presence is checked before age conversion, so a blank name with a
    /// malformed age reports the missing field.
    fn try_from(input: StudentInput) -> Result<Self, Self::Error> {
        let StudentInput { name, age } = input;
        let (Some(name), Some(age)) = (name, age) else {
            return Err(StudentValidationError::MissingFields);
        };
        let name = StudentName::new(name)?;
        let age = age.into_age()?;
        Ok(Self { name, age })
    }
}

/// A student within a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    id: StudentId,
    class_id: ClassId,
    name: StudentName,
    age: Age,
}

impl Student {
    /// Build a [`Student`] from validated components.
    #[must_use]
    pub fn new(id: StudentId, class_id: ClassId, draft: StudentDraft) -> Self {
        let StudentDraft { name, age } = draft;
        Self {
            id,
            class_id,
            name,
            age,
        }
    }

    /// Student identifier.
    #[must_use]
    pub fn id(&self) -> StudentId {
        self.id
    }

    /// Parent class.
    #[must_use]
    pub fn class_id(&self) -> ClassId {
        self.class_id
    }

    /// Student name.
    #[must_use]
    pub fn name(&self) -> &StudentName {
        &self.name
    }

    /// Student age.
    #[must_use]
    pub fn age(&self) -> Age {
        self.age
    }
}
