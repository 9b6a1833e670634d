use crate::ProjectPath;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual Studio release a project file was written by.
///
/// Serialized as the release year (`2008`, not `"Vs2008"`), which is also what
/// `Display` prints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum VsVersion {
    Vs2003,
    Vs2005,
    Vs2008,
    Vs2010,
}

impl VsVersion {
    pub const ALL: [VsVersion; 4] = [
        VsVersion::Vs2003,
        VsVersion::Vs2005,
        VsVersion::Vs2008,
        VsVersion::Vs2010,
    ];

    pub fn year(self) -> u16 {
        match self {
            VsVersion::Vs2003 => 2003,
            VsVersion::Vs2005 => 2005,
            VsVersion::Vs2008 => 2008,
            VsVersion::Vs2010 => 2010,
        }
    }

    pub fn from_year(year: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.year() == year)
    }
}

impl fmt::Display for VsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.year())
    }
}

impl From<VsVersion> for u16 {
    fn from(value: VsVersion) -> Self {
        value.year()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnknownVsVersion(pub u16);

impl fmt::Display for UnknownVsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown Visual Studio version: {}", self.0)
    }
}

impl std::error::Error for UnknownVsVersion {}

impl TryFrom<u16> for VsVersion {
    type Error = UnknownVsVersion;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        VsVersion::from_year(value).ok_or(UnknownVsVersion(value))
    }
}

/// Normalized view of an external project file, independent of schema family.
///
/// Built fresh on every inspection; nothing holds on to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    pub version: VsVersion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    pub source: ProjectPath,
}
