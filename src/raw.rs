use std::fmt;

use smol_str::SmolStr;

use crate::writer::{FormatContext, FormatWriter};

/// Literal SQL, written as-is: never quoted and never parameterized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Raw(SmolStr);

impl Raw {
    /// Accepts anything string-like, including another `Raw`, in which case
    /// the wrapped text is copied unchanged.
    pub fn new<T>(value: T) -> Self
    where
        T: Into<SmolStr>,
    {
        Self(value.into())
    }

    pub fn new_static(value: &'static str) -> Self {
        Self(SmolStr::new_static(value))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Raw> for SmolStr {
    fn from(value: Raw) -> Self {
        value.0
    }
}

impl From<&Raw> for SmolStr {
    fn from(value: &Raw) -> Self {
        value.0.clone()
    }
}

impl fmt::Display for Raw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

pub trait IntoRaw {
    fn into_raw(self) -> Raw;
}

impl IntoRaw for Raw {
    fn into_raw(self) -> Raw {
        self
    }
}

impl IntoRaw for &Raw {
    fn into_raw(self) -> Raw {
        self.clone()
    }
}

impl IntoRaw for &str {
    fn into_raw(self) -> Raw {
        Raw::new(self)
    }
}

impl IntoRaw for String {
    fn into_raw(self) -> Raw {
        Raw::new(self)
    }
}

impl IntoRaw for &String {
    fn into_raw(self) -> Raw {
        Raw::new(self)
    }
}

impl IntoRaw for SmolStr {
    fn into_raw(self) -> Raw {
        Raw(self)
    }
}

impl FormatWriter for Raw {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> crate::Result<()> {
        context.writer.write_str(self.0.as_str())?;
        Ok(())
    }
}
