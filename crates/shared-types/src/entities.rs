//! # Core Domain Entities
//!
//! Defines the addressing and identity entities shared by every task.
//!
//! ## Clusters
//!
//! - **Addressing**: `TaskId`
//! - **Subscriber identity**: `Imsi`, `Plmn`
//! - **Radio access**: `RatType`

use crate::errors::ImsiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// CLUSTER A: ADDRESSING
// =============================================================================

/// Identifier of an internal processing unit that owns an inbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskId {
    /// The S6a bridge itself (source of every answer it posts).
    S6a,
    /// NAS MME task, consumer of authentication answers.
    NasMme,
    /// MME application task, consumer of update-location answers.
    MmeApp,
}

impl TaskId {
    /// Stable numeric identifier.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::S6a => 1,
            Self::NasMme => 2,
            Self::MmeApp => 3,
        }
    }

    /// Stable task name used in logs and metric labels.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::S6a => "TASK_S6A",
            Self::NasMme => "TASK_NAS_MME",
            Self::MmeApp => "TASK_MME_APP",
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// CLUSTER B: SUBSCRIBER IDENTITY
// =============================================================================

/// Maximum number of IMSI digits (3GPP TS 23.003).
pub const IMSI_BCD_DIGITS_MAX: usize = 15;

/// A subscriber identity: up to 15 ASCII digits held inline.
///
/// The value is `Copy`, so a completion closure can own its own snapshot
/// without referencing the caller's buffer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Imsi {
    digits: [u8; IMSI_BCD_DIGITS_MAX],
    len: u8,
}

impl Imsi {
    /// Parse an identity from its decimal string form.
    ///
    /// # Errors
    ///
    /// - `ImsiError::Missing` for an empty string
    /// - `ImsiError::TooLong` above `IMSI_BCD_DIGITS_MAX` digits
    /// - `ImsiError::NonDigit` for any non-decimal character
    pub fn parse(raw: &str) -> Result<Self, ImsiError> {
        if raw.is_empty() {
            return Err(ImsiError::Missing);
        }
        if raw.len() > IMSI_BCD_DIGITS_MAX {
            return Err(ImsiError::TooLong {
                length: raw.len(),
                max: IMSI_BCD_DIGITS_MAX,
            });
        }
        if let Some(position) = raw.bytes().position(|b| !b.is_ascii_digit()) {
            return Err(ImsiError::NonDigit { position });
        }

        let mut digits = [0u8; IMSI_BCD_DIGITS_MAX];
        digits[..raw.len()].copy_from_slice(raw.as_bytes());
        Ok(Self {
            digits,
            len: raw.len() as u8,
        })
    }

    /// The digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Only ASCII digits are ever stored.
        std::str::from_utf8(&self.digits[..self.len()]).unwrap_or_default()
    }

    /// Number of digits.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    /// Always false for a parsed identity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Copy of the first `n` digits (the whole identity if `n` is larger).
    #[must_use]
    pub fn truncated(&self, n: usize) -> Self {
        let n = n.min(self.len());
        let mut digits = [0u8; IMSI_BCD_DIGITS_MAX];
        digits[..n].copy_from_slice(&self.digits[..n]);
        Self {
            digits,
            len: n as u8,
        }
    }
}

impl fmt::Debug for Imsi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Imsi").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Imsi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Imsi {
    type Err = ImsiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Imsi {
    type Error = ImsiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Imsi> for String {
    fn from(imsi: Imsi) -> Self {
        imsi.as_str().to_owned()
    }
}

/// Public Land Mobile Network identity in its 3-octet TBCD encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Plmn(pub [u8; 3]);

// =============================================================================
// CLUSTER C: RADIO ACCESS
// =============================================================================

/// Radio access technology of the serving node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RatType {
    #[default]
    Eutran,
    Nr,
}
