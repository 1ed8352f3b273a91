use serde::Deserialize;
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Number of comics shown on one page.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(try_from = "u8")]
pub enum PageSize {
    One,
    #[default]
    Three,
    Five,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("page size must be 1, 3 or 5, got {0}")]
pub struct InvalidPageSize(pub String);

impl PageSize {
    pub fn get(self) -> usize {
        match self {
            PageSize::One => 1,
            PageSize::Three => 3,
            PageSize::Five => 5,
        }
    }
}

impl TryFrom<u8> for PageSize {
    type Error = InvalidPageSize;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PageSize::One),
            3 => Ok(PageSize::Three),
            5 => Ok(PageSize::Five),
            other => Err(InvalidPageSize(other.to_string())),
        }
    }
}

impl FromStr for PageSize {
    type Err = InvalidPageSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| InvalidPageSize(s.into()))
            .and_then(PageSize::try_from)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// A navigation action: jump, move by pages, and/or resize.
///
/// An explicit `target` wins over `movement`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageRequest {
    pub target: Option<u32>,
    pub movement: i64,
    pub page_size: Option<PageSize>,
}

impl PageRequest {
    pub fn jump(target: u32) -> Self {
        Self {
            target: Some(target),
            ..Self::default()
        }
    }

    pub fn next() -> Self {
        Self {
            movement: 1,
            ..Self::default()
        }
    }

    pub fn previous() -> Self {
        Self {
            movement: -1,
            ..Self::default()
        }
    }

    pub fn resize(page_size: PageSize) -> Self {
        Self {
            page_size: Some(page_size),
            ..Self::default()
        }
    }
}
