//! Feeding domain types.
//!
//! A [`Feeding`] is the decoded form of an [`entities::feeding`](crate::entities::feeding)
//! row: the packed date and time columns become chrono values and the flag
//! columns become [`Breast`] and [`Additions`].

pub mod stats;
pub mod summary;

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sea_orm::ActiveValue;
use serde::{Deserialize, Serialize};

use crate::entities::feeding;
use crate::utils::packed::{self, PackError};
use crate::utils::Clock;

pub use stats::{day_statistics, DayStatistics};
pub use summary::LastFeeding;

/// Which side a feeding was given on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Breast {
    #[default]
    Unknown,
    Left,
    Right,
    Both,
}

impl Breast {
    pub const LEFT: i32 = 1;
    pub const RIGHT: i32 = 2;

    pub fn from_sides(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, true) => Self::Both,
            (true, false) => Self::Left,
            (false, true) => Self::Right,
            (false, false) => Self::Unknown,
        }
    }

    /// Decode the stored flag value. Unknown bits are ignored.
    pub fn from_flags(flags: i32) -> Self {
        Self::from_sides(flags & Self::LEFT != 0, flags & Self::RIGHT != 0)
    }

    pub fn flags(self) -> i32 {
        match self {
            Self::Unknown => 0,
            Self::Left => Self::LEFT,
            Self::Right => Self::RIGHT,
            Self::Both => Self::LEFT | Self::RIGHT,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "-",
            Self::Left => "left",
            Self::Right => "right",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for Breast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Supplements given together with a feeding, stored as a bit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Additions(i32);

impl Additions {
    pub const NONE: Self = Self(0);
    pub const PROBIOTICS: Self = Self(1);
    pub const VIGANTOL: Self = Self(2);
    pub const ESPUMISAN: Self = Self(4);

    const ALL: [(Self, &'static str); 3] = [
        (Self::PROBIOTICS, "probiotics"),
        (Self::VIGANTOL, "vigantol"),
        (Self::ESPUMISAN, "espumisan"),
    ];

    /// Keep only the known flags
    pub fn from_bits_truncate(bits: i32) -> Self {
        Self(bits & (Self::PROBIOTICS.0 | Self::VIGANTOL.0 | Self::ESPUMISAN.0))
    }

    pub fn bits(self) -> i32 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Names of the set flags in a stable order
    pub fn names(self) -> Vec<&'static str> {
        Self::ALL
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl BitOr for Additions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Additions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.insert(rhs);
    }
}

/// A recorded feeding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feeding {
    /// Database id, `None` until stored
    pub id: Option<i32>,
    pub date: NaiveDate,
    /// Minute precision
    pub time: NaiveTime,
    pub breast: Breast,
    pub additions: Additions,
}

impl Feeding {
    pub fn new(date: NaiveDate, time: NaiveTime, breast: Breast, additions: Additions) -> Self {
        Self {
            id: None,
            date,
            time: packed::truncate_to_minute(time),
            breast,
            additions,
        }
    }

    pub fn date_time(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Build the row to insert. A missing id lets SQLite assign one.
    ///
    /// # Errors
    /// Fails if the date cannot be packed.
    pub fn to_active_model(&self) -> Result<feeding::ActiveModel, PackError> {
        Ok(feeding::ActiveModel {
            id: match self.id {
                Some(id) => ActiveValue::Set(id),
                None => ActiveValue::NotSet,
            },
            date: ActiveValue::Set(packed::encode_date(self.date)?),
            time: ActiveValue::Set(packed::encode_time(self.time)),
            breast: ActiveValue::Set(self.breast.flags()),
            additions: ActiveValue::Set(self.additions.bits()),
        })
    }
}

impl TryFrom<feeding::Model> for Feeding {
    type Error = PackError;

    fn try_from(model: feeding::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(model.id),
            date: packed::decode_date(model.date)?,
            time: packed::decode_time(model.time)?,
            breast: Breast::from_flags(model.breast),
            additions: Additions::from_bits_truncate(model.additions),
        })
    }
}

/// What the user ticked when recording a feeding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NewFeeding {
    pub left: bool,
    pub right: bool,
    pub probiotics: bool,
    pub vigantol: bool,
    pub espumisan: bool,
}

impl NewFeeding {
    pub fn breast(&self) -> Breast {
        Breast::from_sides(self.left, self.right)
    }

    pub fn additions(&self) -> Additions {
        let mut additions = Additions::NONE;
        if self.probiotics {
            additions |= Additions::PROBIOTICS;
        }
        if self.vigantol {
            additions |= Additions::VIGANTOL;
        }
        if self.espumisan {
            additions |= Additions::ESPUMISAN;
        }
        additions
    }

    /// Stamp the feeding with the clock's current date and time
    pub fn at<C: Clock + ?Sized>(&self, clock: &C) -> Feeding {
        let now = clock.now();
        Feeding::new(now.date(), now.time(), self.breast(), self.additions())
    }
}
