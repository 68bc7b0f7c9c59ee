use strum::{Display, EnumIter, IntoStaticStr};

/// A field of a shared person entry. Entries have no field names, each field lives at a fixed
/// path of array indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    Id,
    PictureUrl,
    FullName,
    Nickname,
    Longitude,
    Latitude,
    Timestamp,
    Accuracy,
    Address,
    CountryCode,
    Charging,
    BatteryLevel,
}

impl Field {
    /// The path of indices to this field within an entry.
    pub const fn path(self) -> &'static [usize] {
        match self {
            Self::Id => &[6, 0],
            Self::PictureUrl => &[6, 1],
            Self::FullName => &[6, 2],
            Self::Nickname => &[6, 3],
            Self::Longitude => &[1, 1, 1],
            Self::Latitude => &[1, 1, 2],
            Self::Timestamp => &[1, 2],
            Self::Accuracy => &[1, 3],
            Self::Address => &[1, 4],
            Self::CountryCode => &[1, 6],
            Self::Charging => &[13, 0],
            Self::BatteryLevel => &[13, 1],
        }
    }
}
